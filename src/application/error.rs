//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Every failure is scoped to a single request; none is fatal to the
//! process.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── NotFound          - id absent from the store (404)
//! ├── InvalidInput      - create payload missing or malformed (400)
//! ├── StoreUnavailable  - transient backing-store failure (503, retryable)
//! └── Internal          - anything else (500)
//! ```
//!
//! # Examples
//!
//! ```
//! use campus_events::application::error::ApplicationError;
//! use campus_events::infrastructure::persistence::StoreError;
//!
//! let err = ApplicationError::not_found("Event", "event-404");
//! assert!(err.is_not_found());
//!
//! let err: ApplicationError = StoreError::unavailable("connection reset").into();
//! assert!(err.is_retryable());
//! ```

use crate::infrastructure::persistence::StoreError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Request payload is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a store unavailable error.
    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the caller may retry the request unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is an invalid input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity_type, id } => Self::not_found(entity_type, id),
            StoreError::Unavailable(message) => Self::StoreUnavailable(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
