use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use super::auth_model::{IssuedRefreshToken, NewRefreshToken, RefreshToken, TokenRotation};
use super::auth_traits::{RefreshTokenRepositoryTrait, RefreshTokenServiceTrait};
use crate::constants::REFRESH_TOKEN_BYTES;
use crate::errors::Result;

/// Generates a fresh opaque refresh token (base64url, no padding).
pub fn generate_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex-encoded SHA-256 of a raw token; the only form that reaches storage.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub struct RefreshTokenService {
    repository: Arc<dyn RefreshTokenRepositoryTrait>,
}

impl RefreshTokenService {
    pub fn new(repository: Arc<dyn RefreshTokenRepositoryTrait>) -> Self {
        RefreshTokenService { repository }
    }
}

#[async_trait]
impl RefreshTokenServiceTrait for RefreshTokenService {
    async fn issue(
        &self,
        user_id: &str,
        device_info: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<IssuedRefreshToken> {
        let token = generate_token();
        let new_token = NewRefreshToken::new(user_id, hash_token(&token), device_info, now);
        let record = self.repository.create(new_token).await?;
        debug!("Issued refresh token {} for user {}", record.id, record.user_id);
        Ok(IssuedRefreshToken { record, token })
    }

    fn find_active(&self, token: &str, now: DateTime<Utc>) -> Result<Option<RefreshToken>> {
        let found = self.repository.find_by_hash(&hash_token(token))?;
        Ok(found.filter(|t| t.is_active(now)))
    }

    async fn rotate(&self, token: &str, now: DateTime<Utc>) -> Result<Option<IssuedRefreshToken>> {
        let replacement = generate_token();
        let rotation = TokenRotation {
            presented_hash: hash_token(token),
            replacement_hash: hash_token(&replacement),
            now,
        };
        let rotated = self.repository.consume_and_replace(rotation).await?;
        Ok(rotated.map(|record| {
            info!("Rotated refresh token for user {}", record.user_id);
            IssuedRefreshToken {
                record,
                token: replacement,
            }
        }))
    }

    async fn revoke(&self, token: &str) -> Result<bool> {
        let Some(existing) = self.repository.find_by_hash(&hash_token(token))? else {
            return Ok(false);
        };
        if existing.is_revoked {
            return Ok(false);
        }
        let affected = self.repository.revoke(&existing.id).await?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::RwLock;

    // ============== Mock Repository ==============

    #[derive(Default)]
    pub(crate) struct MockRefreshTokenRepository {
        pub(crate) tokens: RwLock<Vec<RefreshToken>>,
        pub(crate) fail_writes: bool,
    }

    impl MockRefreshTokenRepository {
        pub(crate) fn failing() -> Self {
            Self {
                tokens: RwLock::new(Vec::new()),
                fail_writes: true,
            }
        }

        fn insert(&self, new_token: NewRefreshToken) -> RefreshToken {
            let mut tokens = self.tokens.write().unwrap();
            let record = RefreshToken {
                id: format!("rt-{}", tokens.len() + 1),
                user_id: new_token.user_id,
                token_hash: new_token.token_hash,
                expires_at: new_token.expires_at,
                is_revoked: false,
                device_info: new_token.device_info,
                created_at: new_token.created_at,
            };
            tokens.push(record.clone());
            record
        }
    }

    #[async_trait]
    impl RefreshTokenRepositoryTrait for MockRefreshTokenRepository {
        fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
            Ok(self
                .tokens
                .read()
                .unwrap()
                .iter()
                .find(|t| t.token_hash == token_hash)
                .cloned())
        }

        async fn create(&self, new_token: NewRefreshToken) -> Result<RefreshToken> {
            if self.fail_writes {
                return Err(crate::errors::DatabaseError::Internal("store offline".into()).into());
            }
            Ok(self.insert(new_token))
        }

        async fn revoke(&self, token_id: &str) -> Result<usize> {
            let mut tokens = self.tokens.write().unwrap();
            let mut affected = 0;
            for token in tokens.iter_mut().filter(|t| t.id == token_id && !t.is_revoked) {
                token.is_revoked = true;
                affected += 1;
            }
            Ok(affected)
        }

        async fn consume_and_replace(
            &self,
            rotation: TokenRotation,
        ) -> Result<Option<RefreshToken>> {
            if self.fail_writes {
                return Err(crate::errors::DatabaseError::Internal("store offline".into()).into());
            }
            let consumed = {
                let mut tokens = self.tokens.write().unwrap();
                let Some(token) = tokens
                    .iter_mut()
                    .find(|t| t.token_hash == rotation.presented_hash)
                else {
                    return Ok(None);
                };
                if !token.is_active(rotation.now) {
                    return Ok(None);
                }
                token.is_revoked = true;
                token.clone()
            };
            Ok(Some(self.insert(NewRefreshToken::new(
                consumed.user_id,
                rotation.replacement_hash,
                consumed.device_info,
                rotation.now,
            ))))
        }
    }

    fn service() -> (Arc<MockRefreshTokenRepository>, RefreshTokenService) {
        let repo = Arc::new(MockRefreshTokenRepository::default());
        (repo.clone(), RefreshTokenService::new(repo))
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = hash_token("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("abc"));
        assert_ne!(hash, hash_token("abd"));
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(!a.contains('='));
    }

    #[tokio::test]
    async fn test_issue_stores_only_hash() {
        let (repo, service) = service();
        let now = Utc::now();
        let issued = service
            .issue("user-1", Some("Firefox".into()), now)
            .await
            .unwrap();

        let stored = repo.tokens.read().unwrap()[0].clone();
        assert_ne!(stored.token_hash, issued.token);
        assert_eq!(stored.token_hash, hash_token(&issued.token));
        assert_eq!(stored.expires_at, now + Duration::days(30));
        assert_eq!(stored.device_info.as_deref(), Some("Firefox"));
    }

    #[tokio::test]
    async fn test_rotate_is_single_use() {
        let (_repo, service) = service();
        let now = Utc::now();
        let issued = service.issue("user-1", None, now).await.unwrap();

        let first = service.rotate(&issued.token, now).await.unwrap();
        let second = service.rotate(&issued.token, now).await.unwrap();

        let first = first.expect("first rotation should succeed");
        assert_eq!(first.record.user_id, "user-1");
        assert_ne!(first.token, issued.token);
        assert!(second.is_none());
        assert!(service.find_active(&issued.token, now).unwrap().is_none());
        assert!(service.find_active(&first.token, now).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rotate_rejects_expired_token() {
        let (_repo, service) = service();
        let issued_at = Utc::now() - Duration::days(31);
        let issued = service.issue("user-1", None, issued_at).await.unwrap();

        let rotated = service.rotate(&issued.token, Utc::now()).await.unwrap();
        assert!(rotated.is_none());
    }

    #[tokio::test]
    async fn test_rotate_keeps_device_info() {
        let (_repo, service) = service();
        let now = Utc::now();
        let issued = service
            .issue("user-1", Some("Safari on iOS".into()), now)
            .await
            .unwrap();

        let rotated = service.rotate(&issued.token, now).await.unwrap().unwrap();
        assert_eq!(rotated.record.device_info.as_deref(), Some("Safari on iOS"));
    }

    #[tokio::test]
    async fn test_revoke_blocks_rotation() {
        let (_repo, service) = service();
        let now = Utc::now();
        let issued = service.issue("user-1", None, now).await.unwrap();

        assert!(service.revoke(&issued.token).await.unwrap());
        assert!(!service.revoke(&issued.token).await.unwrap());
        assert!(service.rotate(&issued.token, now).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let (_repo, service) = service();
        assert!(!service.revoke("never-issued").await.unwrap());
    }
}
