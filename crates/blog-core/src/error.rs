//! Domain-level error types.

use thiserror::Error;

/// Coarse classification of a [`DomainError`].
///
/// Lets callers pick an HTTP status or exit code without matching on
/// backend-specific detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Backend,
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Backend error during {operation}{}: {source}", key_suffix(.key))]
    Backend {
        operation: &'static str,
        key: Option<String>,
        #[source]
        source: RepoError,
    },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Backend { .. } => ErrorKind::Backend,
        }
    }

    /// Wrap a backend failure with the operation and key it happened on.
    pub fn backend(operation: &'static str, key: Option<&str>, source: RepoError) -> Self {
        DomainError::Backend {
            operation,
            key: key.map(str::to_owned),
            source,
        }
    }
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(k) => format!(" (key {k})"),
        None => String::new(),
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_carries_context() {
        let err = DomainError::backend("update", Some("27"), RepoError::Query("boom".into()));
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert_eq!(
            err.to_string(),
            "Backend error during update (key 27): Query execution failed: boom"
        );
    }

    #[test]
    fn test_backend_error_without_key() {
        let err = DomainError::backend("list_all", None, RepoError::Connection("refused".into()));
        assert_eq!(
            err.to_string(),
            "Backend error during list_all: Database connection failed: refused"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            DomainError::Validation("title required".into()).kind(),
            ErrorKind::Validation
        );
        let not_found = DomainError::NotFound {
            entity_type: "post",
            id: "1".into(),
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
    }
}
