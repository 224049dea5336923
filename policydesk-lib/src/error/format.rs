//! Cell formatting errors

use crate::view::ColumnKind;

/// A value could not be coerced to the kind its column declares.
///
/// Never aborts a render: the affected cell is shown empty.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Cannot render {actual} value '{text}' as {expected:?}")]
pub struct FormatError {
    /// The column kind that was requested.
    pub expected: ColumnKind,
    /// Type name of the offending value.
    pub actual: &'static str,
    /// Text form of the offending value.
    pub text: String,
}

impl FormatError {
    pub fn new(expected: ColumnKind, actual: &'static str, text: impl Into<String>) -> Self {
        Self {
            expected,
            actual,
            text: text.into(),
        }
    }
}
