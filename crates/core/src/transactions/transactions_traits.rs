use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, RecurringBillsSummary, Transaction, TransactionPage, TransactionQuery,
    TransactionSort,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// All transactions of a user, most recent first.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    /// Stores the transaction and applies it to the user's balance.
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn search_transactions(&self, user_id: &str, query: &TransactionQuery)
        -> Result<TransactionPage>;
    fn get_recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>>;
    fn get_categories(&self, user_id: &str) -> Result<Vec<String>>;
    fn get_recurring_bills(
        &self,
        user_id: &str,
        reference: DateTime<Utc>,
        search: Option<&str>,
        sort: TransactionSort,
    ) -> Result<RecurringBillsSummary>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
}
