use crate::budgets::budgets_model::{Budget, BudgetAggregation, NewBudget};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Budgets of a user with their category's transactions attached.
    fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: NewBudget,
    ) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str, category: Option<&str>) -> Result<Vec<Budget>>;
    fn get_budget_summary(&self, user_id: &str, category: Option<&str>)
        -> Result<BudgetAggregation>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: NewBudget,
    ) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()>;
}
