//! # Error Types
//!
//! Structured error types for track_core. Every failure carries enough
//! context to surface a useful message to the user and to keep the
//! application interactive - no error here is ever fatal.
//!
//! ## Example
//!
//! ```rust
//! use track_core::errors::{TrackError, TrackResult};
//!
//! fn validate_name(name: &str) -> TrackResult<()> {
//!     if name.trim().is_empty() {
//!         return Err(TrackError::missing_field("name"));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for track_core operations
pub type TrackResult<T> = Result<T, TrackError>;

/// Structured error type for work-tracker operations.
///
/// Variants map onto the three user-facing failure classes: validation
/// errors (operation aborted, nothing mutated), not-found errors (stale
/// index into the hierarchy), and remote-communication errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TrackError {
    /// An input value is invalid (wrong literal, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A dealer with this name already exists in the store
    #[error("Dealer already exists: {name}")]
    DuplicateDealer { name: String },

    /// A hierarchy lookup referenced something that no longer exists
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// Remote store communication failed (network, timeout, non-2xx)
    #[error("Remote error during {operation}: {reason}")]
    RemoteError { operation: String, reason: String },

    /// Authentication was rejected; the session token must be discarded
    #[error("Authentication failed: {reason}")]
    AuthFailed { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TrackError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TrackError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        TrackError::MissingField {
            field: field.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        TrackError::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a RemoteError
    pub fn remote(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackError::RemoteError {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TrackError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for not-found errors, which the caller recovers from by
    /// re-rendering from the authoritative in-memory state.
    pub fn requires_rerender(&self) -> bool {
        matches!(self, TrackError::NotFound { .. })
    }

    /// True when the session token must be discarded and the user sent
    /// back to the login screen.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, TrackError::AuthFailed { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TrackError::InvalidInput { .. } => "INVALID_INPUT",
            TrackError::MissingField { .. } => "MISSING_FIELD",
            TrackError::DuplicateDealer { .. } => "DUPLICATE_DEALER",
            TrackError::NotFound { .. } => "NOT_FOUND",
            TrackError::RemoteError { .. } => "REMOTE_ERROR",
            TrackError::AuthFailed { .. } => "AUTH_FAILED",
            TrackError::FileError { .. } => "FILE_ERROR",
            TrackError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = TrackError::invalid_input("type", "Timber", "Type must be Concrete or SSM");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: TrackError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TrackError::missing_field("name").error_code(), "MISSING_FIELD");
        assert_eq!(
            TrackError::not_found("Dealer", "Acme").error_code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_recovery_classification() {
        assert!(TrackError::not_found("Entry", "3").requires_rerender());
        assert!(!TrackError::missing_field("name").requires_rerender());
        let auth = TrackError::AuthFailed {
            reason: "401".to_string(),
        };
        assert!(auth.invalidates_session());
    }
}
