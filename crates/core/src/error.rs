//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// invariants, conflicts). Store-level lookups return `Option` instead of
/// `NotFound` wherever absence is a normal path for the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An unknown product category name.
    #[error("unknown category: {0}")]
    InvalidCategory(String),

    /// A subcategory that does not belong to the product's category.
    #[error("subcategory {subcategory} is not valid for category {category}")]
    InvalidSubcategory {
        category: String,
        subcategory: String,
    },

    /// Bonus fidelity points exceeded the configured per-dollar cap.
    #[error("bonus points {points} exceed the allowed maximum {max}")]
    FidelityCapExceeded { points: i64, max: i64 },

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Login failure. Deliberately generic: the message never distinguishes
    /// an unknown username from a wrong password.
    #[error("incorrect username or password")]
    AuthenticationFailed,

    /// Snapshot file could not be read or written.
    #[error("io error: {0}")]
    Io(String),

    /// Snapshot contents could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_message_is_generic() {
        let err = DomainError::AuthenticationFailed;
        // One fixed phrase covering both failure modes; which side failed
        // must not be recoverable from the message.
        assert_eq!(err.to_string(), "incorrect username or password");
    }

    #[test]
    fn subcategory_error_names_both_sides() {
        let err = DomainError::InvalidSubcategory {
            category: "IT equipment".to_string(),
            subcategory: "Comic".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("IT equipment"));
        assert!(msg.contains("Comic"));
    }
}
