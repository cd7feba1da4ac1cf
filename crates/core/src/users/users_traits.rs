use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserCredentials};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    /// Creates the user and an empty balance row in one transaction.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn register(&self, email: &str, name: &str, password_hash: String) -> Result<User>;
}
