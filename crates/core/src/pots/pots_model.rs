//! Pot domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::money_utils::ensure_within_limit;

/// A named savings sub-goal with its target and the amount saved so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub id: String,
    pub name: String,
    pub target: Decimal,
    pub total: Decimal,
    pub theme: String,
}

/// Input model for creating or replacing a pot. New pots start empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPot {
    pub name: String,
    pub target: Decimal,
    pub theme: String,
}

impl NewPot {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.theme.trim().is_empty() {
            return Err(ValidationError::MissingField("theme".to_string()));
        }
        if self.target < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Pot target cannot be negative".to_string(),
            ));
        }
        ensure_within_limit("target", self.target)?;
        Ok(())
    }
}

/// Amount moved between the user's balance and a pot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PotTransfer {
    pub amount: Decimal,
}

impl PotTransfer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Amount must be greater than zero".to_string(),
            ));
        }
        ensure_within_limit("amount", self.amount)?;
        Ok(())
    }
}

/// Presentation totals over a (possibly filtered) set of pots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PotAggregation {
    pub filtered_pots: Vec<Pot>,
    pub total_target: Decimal,
    pub total_saved: Decimal,
    pub progress_percentage: Decimal,
    pub remaining_to_save: Decimal,
}
