//! In-memory user repository

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    DomainResult, StorageError, User, UserFields, UserRepositoryInterface,
};

/// In-memory storage for development and testing
///
/// Identifiers come from a monotonic sequence starting at 1 and are never reused.
pub struct InMemoryUserRepository {
    users: DashMap<i64, User>,
    id_counter: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn create(&self, fields: UserFields) -> DomainResult<i64> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);

        self.users.insert(
            id,
            User {
                id,
                name: fields.name,
                email: fields.email,
                role: fields.role,
                created_at: Utc::now(),
                updated_at: None,
            },
        );

        Ok(id)
    }

    async fn get(&self, id: i64) -> DomainResult<User> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                StorageError::NotFound {
                    entity: "User",
                    field: "id",
                    value: id.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn fields(name: &str) -> UserFields {
        UserFields {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::User,
            password: "secret".into(),
            password_confirm: "secret".into(),
        }
    }

    #[tokio::test]
    async fn identifiers_are_sequential_and_not_reused() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(fields("Ada")).await.unwrap();
        let second = repo.create(fields("Grace")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(second).await.unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.get(1).await.unwrap_err().is_not_found());
    }
}
