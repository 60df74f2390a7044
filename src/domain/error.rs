//! Domain errors

use thiserror::Error;

/// Failures of the storage round trip.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

/// Domain-level error types
///
/// Layers below the API handler pass these upward unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied payload or identifier failed a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A parameterized statement could not be built. Programming defect.
    #[error("Query build error: {0}")]
    QueryBuild(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DomainError {
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_storage_error() {
        let err: DomainError = StorageError::NotFound {
            entity: "User",
            field: "id",
            value: "7".to_string(),
        }
        .into();

        assert!(err.is_storage());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: User with id=7");
    }

    #[test]
    fn query_build_is_not_storage() {
        let err = DomainError::QueryBuild("columns and values mismatch".into());
        assert!(!err.is_storage());
        assert!(!err.is_not_found());
    }
}
