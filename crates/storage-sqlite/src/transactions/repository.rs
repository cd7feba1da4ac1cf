use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use moneyboard_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use moneyboard_core::utils::money_utils::checked_money_add;
use moneyboard_core::Result;

use super::model::TransactionDB;
use crate::balance::{load_balance, save_balance};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;
use crate::utils::format_timestamp;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

/// All transactions of a user, most recent first.
pub(crate) fn load_transactions(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<Transaction>> {
    let rows = transactions::table
        .filter(transactions::user_id.eq(user_id))
        .order((transactions::date.desc(), transactions::created_at.desc()))
        .select(TransactionDB::as_select())
        .load::<TransactionDB>(conn)
        .into_core()?;
    Ok(rows.into_iter().map(Transaction::from).collect())
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        load_transactions(&mut conn, user_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let user_id = user_id.to_string();
        let row = TransactionDB::from_new(
            Uuid::new_v4().to_string(),
            &user_id,
            new_transaction,
            format_timestamp(Utc::now()),
        );

        self.writer
            .exec(move |conn| -> Result<Transaction> {
                let stored = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                let transaction = Transaction::from(stored);

                // Overflow rolls the insert back with the rest of the job.
                let mut balance = load_balance(conn, &user_id)?;
                balance.current = checked_money_add(balance.current, transaction.amount)?;
                if transaction.amount > Decimal::ZERO {
                    balance.income = checked_money_add(balance.income, transaction.amount)?;
                } else {
                    balance.expenses =
                        checked_money_add(balance.expenses, transaction.amount.abs())?;
                }
                save_balance(conn, &user_id, &balance)?;

                Ok(transaction)
            })
            .await
    }
}
