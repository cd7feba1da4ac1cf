//! Transaction domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::money_utils::ensure_within_limit;

/// Domain model representing a single transaction.
///
/// `amount` is signed: negative values are money leaving the balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub avatar: String,
    pub name: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub recurring: bool,
}

/// Input model for recording a new transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(default)]
    pub avatar: Option<String>,
    pub name: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    #[serde(default)]
    pub recurring: bool,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".to_string()));
        }
        if self.amount.is_zero() {
            return Err(ValidationError::InvalidInput(
                "Transaction amount cannot be zero".to_string(),
            ));
        }
        ensure_within_limit("amount", self.amount)?;
        Ok(())
    }
}

/// Sort orders offered by the transactions page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionSort {
    #[default]
    #[serde(rename = "latest")]
    Latest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "a-z")]
    AToZ,
    #[serde(rename = "z-a")]
    ZToA,
    #[serde(rename = "highest")]
    Highest,
    #[serde(rename = "lowest")]
    Lowest,
}

impl FromStr for TransactionSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "latest" => Ok(TransactionSort::Latest),
            "oldest" => Ok(TransactionSort::Oldest),
            "a-z" | "a to z" => Ok(TransactionSort::AToZ),
            "z-a" | "z to a" => Ok(TransactionSort::ZToA),
            "highest" => Ok(TransactionSort::Highest),
            "lowest" => Ok(TransactionSort::Lowest),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown sort order '{other}'"
            ))),
        }
    }
}

/// Search, filter and paging parameters for a transaction listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<TransactionSort>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of a transaction listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Payment state of a recurring bill relative to a reference date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BillStatus {
    Paid,
    DueSoon,
    Upcoming,
}

/// A recurring bill derived from the latest recurring transaction of a payee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
    pub name: String,
    pub avatar: String,
    pub category: String,
    pub amount: Decimal,
    pub due_day: u32,
    pub last_paid: DateTime<Utc>,
    pub status: BillStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    pub count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBillsSummary {
    pub bills: Vec<RecurringBill>,
    pub total: Decimal,
    pub paid: BillTotals,
    pub upcoming: BillTotals,
    pub due_soon: BillTotals,
}
