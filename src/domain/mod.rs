pub mod error;
pub mod user;

// Re-export commonly used types
pub use error::{DomainError, DomainResult, StorageError};
pub use user::{Role, User, UserFields, UserRepositoryInterface};
