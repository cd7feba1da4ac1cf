//! Database models for transactions.

use diesel::prelude::*;

use crate::utils::{format_timestamp, parse_decimal, parse_timestamp};
use moneyboard_core::transactions::{NewTransaction, Transaction};

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub avatar: String,
    pub name: String,
    pub category: String,
    pub date: String,
    pub amount: String,
    pub recurring: bool,
    pub created_at: String,
}

impl TransactionDB {
    pub fn from_new(id: String, user_id: &str, new: NewTransaction, created_at: String) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            avatar: new.avatar.unwrap_or_default(),
            name: new.name,
            category: new.category,
            date: format_timestamp(new.date),
            amount: new.amount.to_string(),
            recurring: new.recurring,
            created_at,
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            date: parse_timestamp(&db.date, "date"),
            amount: parse_decimal(&db.amount, "amount"),
            id: db.id,
            avatar: db.avatar,
            name: db.name,
            category: db.category,
            recurring: db.recurring,
        }
    }
}
