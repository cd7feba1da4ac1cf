use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use moneyboard_core::users::{NewUser, User, UserCredentials, UserRepositoryTrait};
use moneyboard_core::Result;

use super::model::{NewUserDB, UserDB};
use crate::balance::BalanceDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{balances, users};
use crate::utils::format_timestamp;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::email.eq(NewUser::normalized_email(email)))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(UserCredentials::from))
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let row = NewUserDB {
            id: Uuid::new_v4().to_string(),
            email: NewUser::normalized_email(&new_user.email),
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: format_timestamp(Utc::now()),
        };

        self.writer
            .exec(move |conn| -> Result<User> {
                let user = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                diesel::insert_into(balances::table)
                    .values(&BalanceDB::empty(&user.id))
                    .execute(conn)
                    .into_core()?;
                Ok(User::from(user))
            })
            .await
    }
}
