//! User service — application-layer orchestration
//!
//! The seam for business rules on top of persistence. HTTP/RPC handlers
//! should be thin wrappers that delegate to this service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{DomainError, DomainResult, User, UserFields, UserRepositoryInterface};

/// Use cases offered to the API layer.
#[async_trait]
pub trait UserServiceInterface: Send + Sync {
    async fn create(&self, fields: UserFields) -> DomainResult<i64>;
    async fn get(&self, id: i64) -> DomainResult<User>;
}

/// User service.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: UserRepositoryInterface> UserServiceInterface for UserService<R> {
    /// Create a user. Rejects mismatched password confirmation before
    /// anything reaches storage.
    async fn create(&self, fields: UserFields) -> DomainResult<i64> {
        if !fields.passwords_match() {
            warn!(email = %fields.email, "Password and confirmation do not match");
            return Err(DomainError::InvalidArgument(
                "Password and confirmation do not match".into(),
            ));
        }

        let id = self.repo.create(fields).await?;
        debug!(user_id = id, "User created");
        Ok(id)
    }

    async fn get(&self, id: i64) -> DomainResult<User> {
        self.repo.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infrastructure::storage::InMemoryUserRepository;

    fn service() -> (UserService<InMemoryUserRepository>, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        (UserService::new(repo.clone()), repo)
    }

    fn fields(password: &str, confirm: &str) -> UserFields {
        UserFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::Admin,
            password: password.into(),
            password_confirm: confirm.into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_user() {
        let (service, _) = service();

        let id = service.create(fields("x", "x")).await.unwrap();
        let user = service.get(id).await.unwrap();

        assert_eq!(id, 1);
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::Admin);
        assert!(user.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_password_mismatch_without_storing() {
        let (service, repo) = service();

        let err = service.create(fields("x", "y")).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn get_missing_user_propagates_storage_error() {
        let (service, _) = service();

        let err = service.get(42).await.unwrap_err();

        assert!(err.is_storage());
        assert!(err.is_not_found());
    }
}
