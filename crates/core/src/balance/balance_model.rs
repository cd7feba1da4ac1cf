use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current balance of a user with lifetime income and expenses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub current: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
}
