use moneyboard_core::{
    balance::Balance,
    budgets::BudgetAggregation,
    pots::PotAggregation,
    transactions::{RecurringBillsSummary, Transaction},
};
use serde::Serialize;

/// Number of pots shown on the overview page.
pub const OVERVIEW_POT_COUNT: usize = 4;
/// Number of transactions shown on the overview page.
pub const OVERVIEW_TRANSACTION_COUNT: usize = 5;

/// Everything the overview dashboard renders in one payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub balance: Balance,
    /// Totals cover every pot; `filteredPots` holds only the first few.
    pub pots: PotAggregation,
    pub budgets: BudgetAggregation,
    pub recent_transactions: Vec<Transaction>,
    pub recurring_bills: RecurringBillsSummary,
}
