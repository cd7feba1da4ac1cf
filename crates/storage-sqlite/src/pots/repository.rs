use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use moneyboard_core::errors::Error;
use moneyboard_core::pots::{NewPot, Pot, PotRepositoryTrait};
use moneyboard_core::utils::money_utils::{checked_money_add, checked_money_sub};
use moneyboard_core::Result;

use super::model::PotDB;
use crate::balance::{load_balance, save_balance};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::pots;
use crate::utils::format_timestamp;

pub struct PotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PotRepository { pool, writer }
    }
}

fn load_pot(conn: &mut SqliteConnection, user_id: &str, pot_id: &str) -> Result<Option<Pot>> {
    let row = pots::table
        .find(pot_id)
        .filter(pots::user_id.eq(user_id))
        .select(PotDB::as_select())
        .first::<PotDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(Pot::from))
}

#[async_trait]
impl PotRepositoryTrait for PotRepository {
    fn list_pots(&self, user_id: &str) -> Result<Vec<Pot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = pots::table
            .filter(pots::user_id.eq(user_id))
            .order(pots::created_at.asc())
            .select(PotDB::as_select())
            .load::<PotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Pot::from).collect())
    }

    fn get_pot(&self, user_id: &str, pot_id: &str) -> Result<Option<Pot>> {
        let mut conn = get_connection(&self.pool)?;
        load_pot(&mut conn, user_id, pot_id)
    }

    async fn create_pot(&self, user_id: &str, new_pot: NewPot) -> Result<Pot> {
        let row = PotDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_pot.name,
            target: new_pot.target.to_string(),
            total: Decimal::ZERO.to_string(),
            theme: new_pot.theme,
            created_at: format_timestamp(Utc::now()),
        };

        self.writer
            .exec(move |conn| -> Result<Pot> {
                let stored = diesel::insert_into(pots::table)
                    .values(&row)
                    .returning(PotDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(stored.into())
            })
            .await
    }

    async fn update_pot(&self, user_id: &str, pot_id: &str, update: NewPot) -> Result<Pot> {
        let user_id = user_id.to_string();
        let pot_id = pot_id.to_string();

        self.writer
            .exec(move |conn| -> Result<Pot> {
                let updated = diesel::update(
                    pots::table
                        .find(&pot_id)
                        .filter(pots::user_id.eq(&user_id)),
                )
                .set((
                    pots::name.eq(&update.name),
                    pots::target.eq(update.target.to_string()),
                    pots::theme.eq(&update.theme),
                ))
                .returning(PotDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Pot::from)
                    .ok_or_else(|| Error::NotFound(format!("Pot {pot_id}")))
            })
            .await
    }

    async fn delete_pot(&self, user_id: &str, pot_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let pot_id = pot_id.to_string();

        self.writer
            .exec(move |conn| -> Result<usize> {
                let Some(pot) = load_pot(conn, &user_id, &pot_id)? else {
                    return Ok(0);
                };
                let mut balance = load_balance(conn, &user_id)?;
                balance.current = checked_money_add(balance.current, pot.total)?;
                save_balance(conn, &user_id, &balance)?;

                diesel::delete(pots::table.find(&pot_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn move_money(&self, user_id: &str, pot_id: &str, delta: Decimal) -> Result<Pot> {
        let user_id = user_id.to_string();
        let pot_id = pot_id.to_string();

        self.writer
            .exec(move |conn| -> Result<Pot> {
                let mut pot = load_pot(conn, &user_id, &pot_id)?
                    .ok_or_else(|| Error::NotFound(format!("Pot {pot_id}")))?;
                let mut balance = load_balance(conn, &user_id)?;

                let pot_total = checked_money_add(pot.total, delta)?;
                let balance_current = checked_money_sub(balance.current, delta)?;
                if pot_total < Decimal::ZERO {
                    return Err(Error::InsufficientFunds(format!(
                        "Pot '{}' only holds {}",
                        pot.name, pot.total
                    )));
                }
                if balance_current < Decimal::ZERO {
                    return Err(Error::InsufficientFunds(format!(
                        "Balance only holds {}",
                        balance.current
                    )));
                }

                pot.total = pot_total;
                balance.current = balance_current;

                diesel::update(pots::table.find(&pot_id))
                    .set(pots::total.eq(pot.total.to_string()))
                    .execute(conn)
                    .into_core()?;
                save_balance(conn, &user_id, &balance)?;
                Ok(pot)
            })
            .await
    }
}
