//! Error types

mod field;
mod format;
mod source;
mod validation;

pub use field::*;
pub use format::*;
pub use source::*;
pub use validation::*;

/// Top-level error for operations that cross module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input to the view engine.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A record source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A typed record accessor failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Fixture or payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
