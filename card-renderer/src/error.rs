//! Renderer error types.

use card_core::CardError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
///
/// A missing schema or a zero target width is not an error; it renders as
/// empty output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Scaling to the target width failed.
    #[error("Scaling failed: {0}")]
    Scale(#[from] CardError),
}
