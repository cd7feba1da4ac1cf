use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use moneyboard_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use moneyboard_core::errors::Error;
use moneyboard_core::transactions::Transaction;
use moneyboard_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;
use crate::transactions::load_transactions;
use crate::utils::format_timestamp;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

/// Pairs each budget with the user's transactions in its category.
fn with_transactions(
    conn: &mut SqliteConnection,
    user_id: &str,
    rows: Vec<BudgetDB>,
) -> Result<Vec<Budget>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let transactions = load_transactions(conn, user_id)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let in_category: Vec<Transaction> = transactions
                .iter()
                .filter(|t| t.category.eq_ignore_ascii_case(&row.category))
                .cloned()
                .collect();
            row.into_domain(in_category)
        })
        .collect())
}

fn load_budget(
    conn: &mut SqliteConnection,
    user_id: &str,
    budget_id: &str,
) -> Result<Option<Budget>> {
    let row = budgets::table
        .find(budget_id)
        .filter(budgets::user_id.eq(user_id))
        .select(BudgetDB::as_select())
        .first::<BudgetDB>(conn)
        .optional()
        .into_core()?;
    Ok(with_transactions(conn, user_id, row.into_iter().collect())?
        .into_iter()
        .next())
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::created_at.asc())
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;
        with_transactions(&mut conn, user_id, rows)
    }

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        load_budget(&mut conn, user_id, budget_id)
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        let row = BudgetDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category: new_budget.category,
            maximum: new_budget.maximum.to_string(),
            theme: new_budget.theme,
            created_at: format_timestamp(Utc::now()),
        };

        self.writer
            .exec(move |conn| -> Result<Budget> {
                let stored = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                let user_id = stored.user_id.clone();
                with_transactions(conn, &user_id, vec![stored])?
                    .pop()
                    .ok_or_else(|| Error::Unexpected("Inserted budget vanished".to_string()))
            })
            .await
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: NewBudget,
    ) -> Result<Budget> {
        let user_id = user_id.to_string();
        let budget_id = budget_id.to_string();

        self.writer
            .exec(move |conn| -> Result<Budget> {
                let updated = diesel::update(
                    budgets::table
                        .find(&budget_id)
                        .filter(budgets::user_id.eq(&user_id)),
                )
                .set((
                    budgets::category.eq(&update.category),
                    budgets::maximum.eq(update.maximum.to_string()),
                    budgets::theme.eq(&update.theme),
                ))
                .execute(conn)
                .into_core()?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Budget {budget_id}")));
                }
                load_budget(conn, &user_id, &budget_id)?
                    .ok_or_else(|| Error::NotFound(format!("Budget {budget_id}")))
            })
            .await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                diesel::delete(
                    budgets::table
                        .find(&budget_id)
                        .filter(budgets::user_id.eq(&user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use crate::transactions::TransactionRepository;
    use crate::users::UserRepository;
    use moneyboard_core::errors::DatabaseError;
    use moneyboard_core::transactions::{NewTransaction, TransactionRepositoryTrait};
    use moneyboard_core::users::{NewUser, UserRepositoryTrait};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn new_budget(category: &str, maximum: Decimal) -> NewBudget {
        NewBudget {
            category: category.to_string(),
            maximum,
            theme: "#626070".to_string(),
        }
    }

    #[tokio::test]
    async fn test_budgets_carry_their_category_transactions() {
        let db = test_db();
        let user = UserRepository::new(db.pool.clone(), db.writer.clone())
            .create_user(NewUser {
                email: "liam@example.com".to_string(),
                name: "Liam Hughes".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let transactions = TransactionRepository::new(db.pool.clone(), db.writer.clone());
        for (category, amount) in [("Bills", dec!(-100)), ("bills", dec!(-50)), ("Dining Out", dec!(-20))] {
            transactions
                .create_transaction(
                    &user.id,
                    NewTransaction {
                        avatar: None,
                        name: "Payee".to_string(),
                        category: category.to_string(),
                        date: Utc::now(),
                        amount,
                        recurring: false,
                    },
                )
                .await
                .unwrap();
        }

        let repo = BudgetRepository::new(db.pool.clone(), db.writer.clone());
        let bills = repo
            .create_budget(&user.id, new_budget("Bills", dec!(750)))
            .await
            .unwrap();
        assert_eq!(bills.transactions.len(), 2);
        assert_eq!(bills.maximum_decimal(), dec!(750));

        let err = repo
            .create_budget(&user.id, new_budget("BILLS", dec!(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::UniqueViolation(_))));

        let updated = repo
            .update_budget(&user.id, &bills.id, new_budget("Dining Out", dec!(75)))
            .await
            .unwrap();
        assert_eq!(updated.transactions.len(), 1);

        assert_eq!(repo.list_budgets(&user.id).unwrap().len(), 1);
        assert_eq!(repo.delete_budget("other-user", &bills.id).await.unwrap(), 0);
        assert_eq!(repo.delete_budget(&user.id, &bills.id).await.unwrap(), 1);
        assert!(repo.get_budget(&user.id, &bills.id).unwrap().is_none());
    }
}
