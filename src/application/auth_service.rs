use std::sync::Arc;

use tracing::instrument;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService<R: UserRepository + 'static> {
    repo: Arc<R>,
    keys: JwtKeys,
}

impl<R> AuthService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<String, DomainError> {
        let email = email.to_lowercase();
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(DomainError::UserAlreadyExists);
        }

        let hash =
            hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = self.repo.create(User::new(name, email, hash)).await?;

        self.keys
            .generate_token(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        // Unknown email and wrong password take the same exit so the response
        // does not reveal which one it was.
        let user = self
            .repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        self.keys
            .generate_token(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }

        fn count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: User) -> Result<User, DomainError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(DomainError::UserAlreadyExists);
            }
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }
    }

    fn service() -> AuthService<InMemoryUserRepository> {
        AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            JwtKeys::new("test-secret".into()),
        )
    }

    #[tokio::test]
    async fn register_issues_token_for_the_stored_user() {
        let service = service();

        let token = service
            .register("Ada".into(), "ada@example.com".into(), "hunter22".into())
            .await
            .unwrap();

        let claims = service.keys().verify_token(&token).unwrap();
        let stored = service
            .repo
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claims.user.id, stored.id);
    }

    #[tokio::test]
    async fn duplicate_registration_leaves_user_count_unchanged() {
        let service = service();

        service
            .register("Ada".into(), "ada@example.com".into(), "hunter22".into())
            .await
            .unwrap();
        let err = service
            .register("Ada".into(), "ada@example.com".into(), "hunter22".into())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::UserAlreadyExists));
        assert_eq!(service.repo.count(), 1);
    }

    #[tokio::test]
    async fn registration_email_is_stored_lowercased() {
        let service = service();

        service
            .register("Ada".into(), "Ada@Example.com".into(), "hunter22".into())
            .await
            .unwrap();

        assert!(
            service
                .repo
                .find_by_email("ada@example.com")
                .await
                .unwrap()
                .is_some()
        );
        let err = service
            .register("Ada".into(), "ADA@EXAMPLE.COM".into(), "hunter22".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn login_token_decodes_to_the_registered_user() {
        let service = service();

        service
            .register("Ada".into(), "ada@example.com".into(), "hunter22".into())
            .await
            .unwrap();
        let token = service.login("ada@example.com", "hunter22").await.unwrap();

        let claims = service.keys().verify_token(&token).unwrap();
        let stored = service
            .repo
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claims.user.id, stored.id);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let service = service();

        service
            .register("Ada".into(), "ada@example.com".into(), "hunter22".into())
            .await
            .unwrap();

        let unknown = service
            .login("nobody@example.com", "hunter22")
            .await
            .unwrap_err();
        let mismatch = service
            .login("ada@example.com", "wrong-password")
            .await
            .unwrap_err();

        assert!(matches!(unknown, DomainError::InvalidCredentials));
        assert!(matches!(mismatch, DomainError::InvalidCredentials));
    }
}
