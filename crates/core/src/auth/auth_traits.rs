use crate::auth::auth_model::{IssuedRefreshToken, NewRefreshToken, RefreshToken, TokenRotation};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for refresh-token repository operations
#[async_trait]
pub trait RefreshTokenRepositoryTrait: Send + Sync {
    fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>>;
    async fn create(&self, new_token: NewRefreshToken) -> Result<RefreshToken>;
    async fn revoke(&self, token_id: &str) -> Result<usize>;

    /// Revokes the token matching `rotation.presented_hash` and inserts its
    /// replacement in a single write transaction.
    ///
    /// Returns `None` when no active token matched; the store is left untouched.
    async fn consume_and_replace(&self, rotation: TokenRotation) -> Result<Option<RefreshToken>>;
}

/// Trait for refresh-token service operations
#[async_trait]
pub trait RefreshTokenServiceTrait: Send + Sync {
    async fn issue(
        &self,
        user_id: &str,
        device_info: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<IssuedRefreshToken>;
    fn find_active(&self, token: &str, now: DateTime<Utc>) -> Result<Option<RefreshToken>>;
    async fn rotate(&self, token: &str, now: DateTime<Utc>) -> Result<Option<IssuedRefreshToken>>;
    async fn revoke(&self, token: &str) -> Result<bool>;
}
