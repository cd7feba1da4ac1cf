//! Transactions module - listing, search, recurring bills.

mod recurring_bills;
mod transactions_model;
mod transactions_query;
mod transactions_service;
mod transactions_traits;

pub use recurring_bills::summarize_recurring_bills;
pub use transactions_model::{
    BillStatus, BillTotals, NewTransaction, RecurringBill, RecurringBillsSummary, Transaction,
    TransactionPage, TransactionQuery, TransactionSort,
};
pub use transactions_query::query_transactions;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
