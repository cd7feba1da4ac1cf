//! Database models for refresh tokens.

use diesel::prelude::*;

use crate::utils::{format_timestamp, parse_timestamp};
use moneyboard_core::auth::{NewRefreshToken, RefreshToken};

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::refresh_tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RefreshTokenDB {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: String,
    pub is_revoked: bool,
    pub device_info: Option<String>,
    pub created_at: String,
}

impl RefreshTokenDB {
    pub fn from_new(id: String, new_token: NewRefreshToken) -> Self {
        Self {
            id,
            user_id: new_token.user_id,
            token_hash: new_token.token_hash,
            expires_at: format_timestamp(new_token.expires_at),
            is_revoked: false,
            device_info: new_token.device_info,
            created_at: format_timestamp(new_token.created_at),
        }
    }
}

impl From<RefreshTokenDB> for RefreshToken {
    fn from(db: RefreshTokenDB) -> Self {
        Self {
            expires_at: parse_timestamp(&db.expires_at, "expires_at"),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            id: db.id,
            user_id: db.user_id,
            token_hash: db.token_hash,
            is_revoked: db.is_revoked,
            device_info: db.device_info,
        }
    }
}
