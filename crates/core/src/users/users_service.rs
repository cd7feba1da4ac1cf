use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::users_model::{NewUser, User, UserCredentials};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result, ValidationError};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }

    fn validate(email: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if email.is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(ValidationError::InvalidInput(format!("'{email}' is not an email address")).into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        self.repository
            .find_credentials_by_email(&NewUser::normalized_email(email))
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {user_id}")))
    }

    async fn register(&self, email: &str, name: &str, password_hash: String) -> Result<User> {
        let email = NewUser::normalized_email(email);
        Self::validate(&email, name)?;

        if self.repository.find_credentials_by_email(&email)?.is_some() {
            return Err(Error::Conflict(format!("An account for {email} already exists")));
        }

        let user = self
            .repository
            .create_user(NewUser {
                email,
                name: name.trim().to_string(),
                password_hash,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockUserRepository {
        users: RwLock<Vec<UserCredentials>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|c| c.user.email == email)
                .cloned())
        }

        fn get_user(&self, user_id: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|c| c.user.id == user_id)
                .map(|c| c.user.clone()))
        }

        async fn create_user(&self, new_user: NewUser) -> Result<User> {
            let mut users = self.users.write().unwrap();
            let user = User {
                id: format!("user-{}", users.len() + 1),
                email: new_user.email,
                name: new_user.name,
                created_at: Utc::now(),
            };
            users.push(UserCredentials {
                user: user.clone(),
                password_hash: new_user.password_hash,
            });
            Ok(user)
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(MockUserRepository::default()))
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let service = service();
        let user = service
            .register("  Jane@Example.COM ", " Jane ", "hash".into())
            .await
            .unwrap();

        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.name, "Jane");
        let creds = service.find_credentials("JANE@example.com").unwrap().unwrap();
        assert_eq!(creds.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = service();
        service
            .register("jane@example.com", "Jane", "hash".into())
            .await
            .unwrap();

        let err = service
            .register("JANE@example.com", "Other", "hash".into())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let service = service();
        assert!(matches!(
            service.register("not-an-email", "Jane", "h".into()).await,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert!(matches!(
            service.register("jane@example.com", "  ", "h".into()).await,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }

    #[test]
    fn test_get_unknown_user() {
        let service = service();
        assert!(matches!(service.get_user("nope"), Err(Error::NotFound(_))));
    }
}
