//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored argon2 PHC string, used only for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Input model for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Emails are matched case-insensitively; store them in canonical form.
    pub fn normalized_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
