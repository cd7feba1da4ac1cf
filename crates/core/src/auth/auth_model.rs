//! Session and refresh-token domain models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{REFRESH_TOKEN_TTL_DAYS, SESSION_TTL_DAYS};

/// Identity claim carried in the encrypted session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Starts a session for `user_id` that lives for the standard session window.
    pub fn start(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Persisted refresh token. Only the hash of the opaque value is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub device_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// A token may be honored only while it is neither revoked nor expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked && !self.is_expired(now)
    }
}

/// Input model for persisting a new refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub device_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewRefreshToken {
    pub fn new(
        user_id: impl Into<String>,
        token_hash: impl Into<String>,
        device_info: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            token_hash: token_hash.into(),
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            device_info,
            created_at: now,
        }
    }
}

/// Atomic rotation request: revoke the active token matching `presented_hash`
/// and store a replacement bound to the same user and device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRotation {
    pub presented_hash: String,
    pub replacement_hash: String,
    pub now: DateTime<Utc>,
}

/// A freshly minted refresh token together with its raw cookie value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRefreshToken {
    pub record: RefreshToken,
    pub token: String,
}
