//! Database models for budgets.

use diesel::prelude::*;

use moneyboard_core::budgets::Budget;
use moneyboard_core::transactions::Transaction;

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub maximum: String,
    pub theme: String,
    pub created_at: String,
}

impl BudgetDB {
    /// Builds the domain budget, attaching the given category transactions.
    pub fn into_domain(self, transactions: Vec<Transaction>) -> Budget {
        Budget {
            id: self.id,
            category: self.category,
            maximum: self.maximum,
            theme: self.theme,
            transactions,
        }
    }
}
