//! Kind-based cell formatting.

use super::Cell;
use super::ColumnKind;
use crate::error::FormatError;
use crate::model::Value;
use crate::model::types::Money;

/// Formats one value for a column of the given kind.
///
/// Missing and null values give [`Cell::Empty`]. A value that cannot be read
/// as the column's kind is a [`FormatError`]; callers render it empty.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::Value;
/// use policydesk_lib::view::{format_value, ColumnKind};
///
/// let cell = format_value(ColumnKind::Currency, Some(&Value::from(1234.5))).unwrap();
/// assert_eq!(cell.as_text(), "$1,234.50");
///
/// let cell = format_value(ColumnKind::Date, Some(&Value::from("2025-03-07"))).unwrap();
/// assert_eq!(cell.as_text(), "3/7/2025");
/// ```
pub fn format_value(kind: ColumnKind, value: Option<&Value>) -> Result<Cell, FormatError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(Cell::Empty),
        Some(value) => value,
    };

    match kind {
        ColumnKind::Plain => Ok(Cell::Text(value.to_string())),
        ColumnKind::Status => Ok(Cell::status(value.to_string())),
        ColumnKind::Currency => value
            .to_decimal()
            .map(|d| Cell::Text(Money::new(d).to_usd()))
            .ok_or_else(|| FormatError::new(kind, value.type_name(), value.to_string())),
        ColumnKind::Date => value
            .to_date()
            .map(|d| Cell::Text(d.format("%-m/%-d/%Y").to_string()))
            .ok_or_else(|| FormatError::new(kind, value.type_name(), value.to_string())),
    }
}
