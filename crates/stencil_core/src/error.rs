//! Error types for the engine.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during engine operations.
///
/// A render request lacking required values is *not* an error; it is
/// reported as a [`crate::render::RenderReply::MissingInputs`] outcome.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error("No template named '{0}'")]
    NameNotFound(String),

    #[error("Template name already in use: {0}")]
    NameTaken(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
