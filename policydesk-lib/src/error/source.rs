//! Record source error types

use std::time::Duration;

use crate::model::EntityKind;

/// Errors reported by a [`RecordSource`](crate::store::RecordSource).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// No record with the given id exists in the collection.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    /// The backing service could not be reached or answered with a failure.
    #[error("{kind} source unavailable: {message}")]
    Unavailable { kind: EntityKind, message: String },

    /// The request did not complete in time.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The source refused the record (bad payload, constraint violation).
    #[error("{kind} rejected: {message}")]
    Rejected { kind: EntityKind, message: String },
}

impl SourceError {
    /// Creates a not found error.
    pub fn not_found(kind: EntityKind, id: u64) -> Self {
        Self::NotFound { kind, id }
    }

    /// Creates an unavailable error.
    pub fn unavailable(kind: EntityKind, message: impl Into<String>) -> Self {
        Self::Unavailable {
            kind,
            message: message.into(),
        }
    }

    /// Creates a rejected error.
    pub fn rejected(kind: EntityKind, message: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            message: message.into(),
        }
    }

    /// Returns `true` if re-invoking the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout(_))
    }
}
