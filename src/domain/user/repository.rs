use async_trait::async_trait;

use super::{User, UserFields};
use crate::domain::DomainResult;

/// Persistence port for users.
///
/// Every call is a single round trip to storage; implementations never
/// retry and never span a transaction across calls.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a new user and return the identifier assigned by storage.
    async fn create(&self, fields: UserFields) -> DomainResult<i64>;

    /// Fetch a user by identifier.
    async fn get(&self, id: i64) -> DomainResult<User>;
}
