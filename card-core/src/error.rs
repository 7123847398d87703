//! Error types for card layout operations.

use thiserror::Error;

/// Result type for card layout operations.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur in card layout operations.
///
/// Store mutations that address a missing element, template, or history entry
/// are soft no-ops and never produce these errors.
#[derive(Debug, Error)]
pub enum CardError {
    /// A required argument was missing or not a finite number.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Element not found in schema.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Template not found among the bundled templates.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Schema serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
