//! Validation errors raised by the view engine.

/// Malformed input handed to the view engine.
///
/// These are caller contract violations. The engine reports them instead of
/// rendering a degraded view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The column schema is empty.
    #[error("Column schema must contain at least one column")]
    NoColumns,

    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// The sort key does not name a column in the schema.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// Page size must be at least one.
    #[error("Page size must be at least 1")]
    ZeroPageSize,

    /// Pages are numbered from one.
    #[error("Page number must be at least 1")]
    ZeroPage,
}

impl ValidationError {
    /// Creates an unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }
}
