//! Budget domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::transactions::Transaction;
use crate::utils::money_utils::ensure_within_limit;

/// Domain model representing a per-category spending cap.
///
/// `maximum` is kept as the stored decimal string; use [`Budget::maximum_decimal`]
/// for arithmetic. `transactions` holds the user's transactions in this category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub maximum: String,
    pub theme: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Budget {
    pub fn maximum_decimal(&self) -> Decimal {
        self.maximum.trim().parse().unwrap_or(Decimal::ZERO)
    }
}

/// Input model for creating or replacing a budget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub maximum: Decimal,
    pub theme: String,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".to_string()));
        }
        if self.theme.trim().is_empty() {
            return Err(ValidationError::MissingField("theme".to_string()));
        }
        if self.maximum <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Budget maximum must be greater than zero".to_string(),
            ));
        }
        ensure_within_limit("maximum", self.maximum)?;
        Ok(())
    }
}

/// Presentation totals over a (possibly filtered) set of budgets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAggregation {
    pub filtered_budgets: Vec<Budget>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining_budget: Decimal,
}
