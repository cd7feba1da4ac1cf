use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::budgets_aggregation::aggregate_budgets;
use super::budgets_model::{Budget, BudgetAggregation, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }

    /// One budget per category; `except` skips the budget being updated.
    fn ensure_category_free(&self, user_id: &str, category: &str, except: Option<&str>) -> Result<()> {
        let taken = self
            .repository
            .list_budgets(user_id)?
            .into_iter()
            .any(|b| b.category.eq_ignore_ascii_case(category) && Some(b.id.as_str()) != except);
        if taken {
            return Err(Error::Conflict(format!(
                "A budget for '{category}' already exists"
            )));
        }
        Ok(())
    }

    fn normalize(mut budget: NewBudget) -> Result<NewBudget> {
        budget.validate()?;
        budget.category = budget.category.trim().to_string();
        budget.theme = budget.theme.trim().to_string();
        Ok(budget)
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str, category: Option<&str>) -> Result<Vec<Budget>> {
        let budgets = self.repository.list_budgets(user_id)?;
        Ok(aggregate_budgets(Some(&budgets), category).filtered_budgets)
    }

    fn get_budget_summary(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> Result<BudgetAggregation> {
        let budgets = self.repository.list_budgets(user_id)?;
        Ok(aggregate_budgets(Some(&budgets), category))
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        let new_budget = Self::normalize(new_budget)?;
        self.ensure_category_free(user_id, &new_budget.category, None)?;
        let budget = self.repository.create_budget(user_id, new_budget).await?;
        debug!("Created budget {} ({})", budget.id, budget.category);
        Ok(budget)
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: NewBudget,
    ) -> Result<Budget> {
        let update = Self::normalize(update)?;
        if self.repository.get_budget(user_id, budget_id)?.is_none() {
            return Err(Error::NotFound(format!("Budget {budget_id}")));
        }
        self.ensure_category_free(user_id, &update.category, Some(budget_id))?;
        self.repository
            .update_budget(user_id, budget_id, update)
            .await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()> {
        let deleted = self.repository.delete_budget(user_id, budget_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Budget {budget_id}")));
        }
        Ok(())
    }
}
