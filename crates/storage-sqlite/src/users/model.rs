//! Database models for users.

use diesel::prelude::*;

use crate::utils::parse_timestamp;
use moneyboard_core::users::{User, UserCredentials};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: String,
}

impl From<UserDB> for UserCredentials {
    fn from(db: UserDB) -> Self {
        Self {
            user: User {
                created_at: parse_timestamp(&db.created_at, "created_at"),
                id: db.id,
                email: db.email,
                name: db.name,
            },
            password_hash: db.password_hash,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        UserCredentials::from(db).user
    }
}
