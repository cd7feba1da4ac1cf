use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use moneyboard_core::balance::{Balance, BalanceRepositoryTrait};
use moneyboard_core::Result;

use super::model::BalanceDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::balances;

pub struct BalanceRepository {
    pool: Arc<DbPool>,
}

impl BalanceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        BalanceRepository { pool }
    }
}

impl BalanceRepositoryTrait for BalanceRepository {
    fn get_balance(&self, user_id: &str) -> Result<Option<Balance>> {
        let mut conn = get_connection(&self.pool)?;
        let balance = balances::table
            .find(user_id)
            .select(BalanceDB::as_select())
            .first::<BalanceDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(balance.map(Balance::from))
    }
}

/// Reads a user's balance inside a write job; a missing row reads as zero.
pub(crate) fn load_balance(conn: &mut SqliteConnection, user_id: &str) -> Result<Balance> {
    let balance = balances::table
        .find(user_id)
        .select(BalanceDB::as_select())
        .first::<BalanceDB>(conn)
        .optional()
        .into_core()?;
    Ok(balance.map(Balance::from).unwrap_or_default())
}

pub(crate) fn save_balance(
    conn: &mut SqliteConnection,
    user_id: &str,
    balance: &Balance,
) -> Result<()> {
    let row = BalanceDB::from_domain(user_id, balance);
    diesel::insert_into(balances::table)
        .values(&row)
        .on_conflict(balances::user_id)
        .do_update()
        .set(&row)
        .execute(conn)
        .into_core()?;
    Ok(())
}
