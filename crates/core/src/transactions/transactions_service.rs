use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::recurring_bills::summarize_recurring_bills;
use super::transactions_model::{
    NewTransaction, RecurringBillsSummary, Transaction, TransactionPage, TransactionQuery,
    TransactionSort,
};
use super::transactions_query::query_transactions;
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn search_transactions(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionPage> {
        let transactions = self.repository.list_transactions(user_id)?;
        Ok(query_transactions(&transactions, query))
    }

    fn get_recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        let mut transactions = self.repository.list_transactions(user_id)?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(limit);
        Ok(transactions)
    }

    fn get_categories(&self, user_id: &str) -> Result<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for t in self.repository.list_transactions(user_id)? {
            if !categories.iter().any(|c| c.eq_ignore_ascii_case(&t.category)) {
                categories.push(t.category);
            }
        }
        categories.sort();
        Ok(categories)
    }

    fn get_recurring_bills(
        &self,
        user_id: &str,
        reference: DateTime<Utc>,
        search: Option<&str>,
        sort: TransactionSort,
    ) -> Result<RecurringBillsSummary> {
        let transactions = self.repository.list_transactions(user_id)?;
        Ok(summarize_recurring_bills(&transactions, reference, search, sort))
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        mut new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        new_transaction.name = new_transaction.name.trim().to_string();
        new_transaction.category = new_transaction.category.trim().to_string();
        self.repository
            .create_transaction(user_id, new_transaction)
            .await
    }
}
