//! Silent session renewal.
//!
//! Given the session and refresh-token cookie presented with a request, decide
//! whether a new session can be minted. The outcome is either a fresh
//! session plus its replacement refresh token, or [`Unrenewed`], which carries
//! no detail: to the caller, every failure looks like "was not logged in".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::auth_model::{IssuedRefreshToken, Session};
use super::auth_traits::RefreshTokenServiceTrait;

/// Credentials read from one inbound request.
#[derive(Debug, Clone, Copy)]
pub struct RenewalRequest<'a> {
    pub session: Option<&'a Session>,
    pub refresh_token: Option<&'a str>,
    pub now: DateTime<Utc>,
}

/// A renewed session and the refresh token that replaced the consumed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalOutcome {
    pub session: Session,
    pub refresh_token: IssuedRefreshToken,
}

/// Renewal was not needed or not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unrenewed;

pub struct SessionRenewer {
    refresh_tokens: Arc<dyn RefreshTokenServiceTrait>,
}

impl SessionRenewer {
    pub fn new(refresh_tokens: Arc<dyn RefreshTokenServiceTrait>) -> Self {
        SessionRenewer { refresh_tokens }
    }

    /// Attempts to renew an expired session.
    ///
    /// The refresh-token store is touched only when a session is present and
    /// expired and a refresh token was presented.
    pub async fn renew(&self, request: RenewalRequest<'_>) -> Result<RenewalOutcome, Unrenewed> {
        let session = request.session.ok_or(Unrenewed)?;
        if !session.is_expired(request.now) {
            return Err(Unrenewed);
        }

        let token = request
            .refresh_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                debug!("Session for user {} expired without a refresh token", session.user_id);
                Unrenewed
            })?;

        let rotated = match self.refresh_tokens.rotate(token, request.now).await {
            Ok(Some(issued)) => issued,
            Ok(None) => {
                debug!("Presented refresh token is unknown, revoked or expired");
                return Err(Unrenewed);
            }
            Err(e) => {
                warn!("Refresh token rotation failed: {}", e);
                return Err(Unrenewed);
            }
        };

        if rotated.record.user_id != session.user_id {
            warn!(
                "Refresh token for user {} presented with session of user {}",
                rotated.record.user_id, session.user_id
            );
        }

        Ok(RenewalOutcome {
            session: Session::start(rotated.record.user_id.clone(), request.now),
            refresh_token: rotated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::refresh_token_service::tests::MockRefreshTokenRepository;
    use crate::auth::RefreshTokenService;
    use chrono::Duration;

    fn renewer_with(repo: MockRefreshTokenRepository) -> (Arc<RefreshTokenService>, SessionRenewer) {
        let service = Arc::new(RefreshTokenService::new(Arc::new(repo)));
        (service.clone(), SessionRenewer::new(service))
    }

    fn expired_session(now: DateTime<Utc>) -> Session {
        Session {
            user_id: "user-1".to_string(),
            expires_at: now - Duration::minutes(1),
        }
    }

    #[tokio::test]
    async fn test_no_session_is_not_renewed() {
        let (tokens, renewer) = renewer_with(MockRefreshTokenRepository::default());
        let now = Utc::now();
        let issued = tokens.issue("user-1", None, now).await.unwrap();

        let result = renewer
            .renew(RenewalRequest {
                session: None,
                refresh_token: Some(&issued.token),
                now,
            })
            .await;

        assert_eq!(result, Err(Unrenewed));
        // Inspection must not consume the token.
        assert!(tokens.find_active(&issued.token, now).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_live_session_is_not_renewed() {
        let (tokens, renewer) = renewer_with(MockRefreshTokenRepository::default());
        let now = Utc::now();
        let issued = tokens.issue("user-1", None, now).await.unwrap();
        let session = Session::start("user-1", now);

        let result = renewer
            .renew(RenewalRequest {
                session: Some(&session),
                refresh_token: Some(&issued.token),
                now,
            })
            .await;

        assert_eq!(result, Err(Unrenewed));
        assert!(tokens.find_active(&issued.token, now).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_session_without_token() {
        let (_tokens, renewer) = renewer_with(MockRefreshTokenRepository::default());
        let now = Utc::now();
        let session = expired_session(now);

        let result = renewer
            .renew(RenewalRequest {
                session: Some(&session),
                refresh_token: None,
                now,
            })
            .await;
        assert_eq!(result, Err(Unrenewed));

        let blank = renewer
            .renew(RenewalRequest {
                session: Some(&session),
                refresh_token: Some("   "),
                now,
            })
            .await;
        assert_eq!(blank, Err(Unrenewed));
    }

    #[tokio::test]
    async fn test_expired_session_with_valid_token_is_renewed() {
        let (tokens, renewer) = renewer_with(MockRefreshTokenRepository::default());
        let now = Utc::now();
        let issued = tokens.issue("user-1", None, now).await.unwrap();
        let session = expired_session(now);

        let outcome = renewer
            .renew(RenewalRequest {
                session: Some(&session),
                refresh_token: Some(&issued.token),
                now,
            })
            .await
            .expect("renewal should succeed");

        assert_eq!(outcome.session.user_id, "user-1");
        assert_eq!(outcome.session.expires_at, now + Duration::days(7));
        assert_ne!(outcome.refresh_token.token, issued.token);
    }

    #[tokio::test]
    async fn test_consumed_token_cannot_renew_twice() {
        let (tokens, renewer) = renewer_with(MockRefreshTokenRepository::default());
        let now = Utc::now();
        let issued = tokens.issue("user-1", None, now).await.unwrap();
        let session = expired_session(now);
        let request = RenewalRequest {
            session: Some(&session),
            refresh_token: Some(&issued.token),
            now,
        };

        assert!(renewer.renew(request).await.is_ok());
        assert_eq!(renewer.renew(request).await, Err(Unrenewed));
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let (_tokens, renewer) = renewer_with(MockRefreshTokenRepository::failing());
        let now = Utc::now();
        let session = expired_session(now);

        let result = renewer
            .renew(RenewalRequest {
                session: Some(&session),
                refresh_token: Some("whatever"),
                now,
            })
            .await;
        assert_eq!(result, Err(Unrenewed));
    }
}
