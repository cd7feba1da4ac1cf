use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use moneyboard_core::auth::{
    NewRefreshToken, RefreshToken, RefreshTokenRepositoryTrait, TokenRotation,
};
use moneyboard_core::Result;

use super::model::RefreshTokenDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::refresh_tokens;
use crate::utils::format_timestamp;

pub struct RefreshTokenRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RefreshTokenRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RefreshTokenRepository { pool, writer }
    }
}

#[async_trait]
impl RefreshTokenRepositoryTrait for RefreshTokenRepository {
    fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
        let mut conn = get_connection(&self.pool)?;
        let token = refresh_tokens::table
            .filter(refresh_tokens::token_hash.eq(token_hash))
            .select(RefreshTokenDB::as_select())
            .first::<RefreshTokenDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(token.map(RefreshToken::from))
    }

    async fn create(&self, new_token: NewRefreshToken) -> Result<RefreshToken> {
        let row = RefreshTokenDB::from_new(Uuid::new_v4().to_string(), new_token);
        self.writer
            .exec(move |conn| -> Result<RefreshToken> {
                let stored = diesel::insert_into(refresh_tokens::table)
                    .values(&row)
                    .returning(RefreshTokenDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(stored.into())
            })
            .await
    }

    async fn revoke(&self, token_id: &str) -> Result<usize> {
        let token_id = token_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                diesel::update(
                    refresh_tokens::table
                        .find(&token_id)
                        .filter(refresh_tokens::is_revoked.eq(false)),
                )
                .set(refresh_tokens::is_revoked.eq(true))
                .execute(conn)
                .into_core()
            })
            .await
    }

    async fn consume_and_replace(&self, rotation: TokenRotation) -> Result<Option<RefreshToken>> {
        self.writer
            .exec(move |conn| -> Result<Option<RefreshToken>> {
                let now = format_timestamp(rotation.now);
                // The revoked flag is the single-use guard: of two writers holding
                // the same token, only the first sees it active.
                let consumed = diesel::update(
                    refresh_tokens::table
                        .filter(refresh_tokens::token_hash.eq(&rotation.presented_hash))
                        .filter(refresh_tokens::is_revoked.eq(false))
                        .filter(refresh_tokens::expires_at.gt(&now)),
                )
                .set(refresh_tokens::is_revoked.eq(true))
                .returning(RefreshTokenDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;

                let Some(consumed) = consumed else {
                    return Ok(None);
                };

                let replacement = RefreshTokenDB::from_new(
                    Uuid::new_v4().to_string(),
                    NewRefreshToken::new(
                        consumed.user_id,
                        rotation.replacement_hash,
                        consumed.device_info,
                        rotation.now,
                    ),
                );
                let stored = diesel::insert_into(refresh_tokens::table)
                    .values(&replacement)
                    .returning(RefreshTokenDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Some(stored.into()))
            })
            .await
    }
}
