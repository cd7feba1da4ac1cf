//! Database models for balances.

use diesel::prelude::*;

use crate::utils::parse_decimal;
use moneyboard_core::balance::Balance;

#[derive(Queryable, Identifiable, Selectable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::balances)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceDB {
    pub user_id: String,
    pub current: String,
    pub income: String,
    pub expenses: String,
}

impl BalanceDB {
    pub fn empty(user_id: &str) -> Self {
        Self::from_domain(user_id, &Balance::default())
    }

    pub fn from_domain(user_id: &str, balance: &Balance) -> Self {
        Self {
            user_id: user_id.to_string(),
            current: balance.current.to_string(),
            income: balance.income.to_string(),
            expenses: balance.expenses.to_string(),
        }
    }
}

impl From<BalanceDB> for Balance {
    fn from(db: BalanceDB) -> Self {
        Self {
            current: parse_decimal(&db.current, "current"),
            income: parse_decimal(&db.income, "income"),
            expenses: parse_decimal(&db.expenses, "expenses"),
        }
    }
}
