//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde::Serializer;

use super::types::Money;

/// A dynamic value that can hold any CRM field type.
///
/// Used in [`Record`](super::Record) to store field values dynamically.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Int` / `Long` |
/// | fraction | `Float` |
/// | RFC 3339 string | `DateTime` |
/// | `YYYY-MM-DD` string | `Date` |
/// | other string | `String` |
/// | array, object | `Json` |
///
/// `Decimal` and `Money` are never produced by JSON decoding; callers build
/// them explicitly.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::Value;
///
/// let name = Value::from("Jane Doe");
/// let premium = Value::from(1_250i64);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(#[serde(serialize_with = "serialize_decimal")] Decimal),
    /// String value.
    String(String),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// Monetary value.
    Money(#[serde(serialize_with = "serialize_money")] Money),
    /// Fallback for nested JSON values.
    Json(serde_json::Value),
}

/// Writes a decimal as a JSON number: an integer when it has no fraction,
/// otherwise the nearest float.
fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract().is_zero() {
        if let Some(n) = value.to_i64() {
            return serializer.serialize_i64(n);
        }
    }
    match value.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => serializer.serialize_str(&value.to_string()),
    }
}

fn serialize_money<S>(value: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serialize_decimal(&value.value(), serializer)
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Money(_) => "money",
            Value::Json(_) => "json",
        }
    }

    /// Returns `true` for the numeric variants (including money).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) | Value::Money(_)
        )
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces numeric values (and numeric text) to a decimal.
    ///
    /// Non-finite floats and non-numeric values yield `None`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Long(n) => Some(Decimal::from(*n)),
            Value::Float(f) => Decimal::from_f64_retain(*f),
            Value::Decimal(d) => Some(*d),
            Value::Money(m) => Some(m.value()),
            Value::String(s) => s.trim().parse::<Decimal>().ok(),
            _ => None,
        }
    }

    /// Coerces date-like values (and date text) to a calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date_naive()),
            Value::String(s) => parse_date(s),
            _ => None,
        }
    }
}

/// Parses the date shapes that CRM payloads carry: RFC 3339 timestamps,
/// zone-less ISO timestamps, and plain `YYYY-MM-DD` dates.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            // Whole floats print without a trailing ".0"
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Float(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Money(m) => write!(f, "{}", m),
            Value::Json(j) => write!(f, "{}", j),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(Value::Long)
            .unwrap_or_else(|_| Value::Decimal(Decimal::from(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Money(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        super::record_serde::json_value_to_value(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plain_values() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(10.0).to_string(), "10");
        assert_eq!(Value::from(10.25).to_string(), "10.25");
        assert_eq!(Value::from("Auto").to_string(), "Auto");
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Value::from(5i32).to_decimal(), Some(Decimal::from(5)));
        assert_eq!(Value::from("12.50").to_decimal(), Some(Decimal::new(1250, 2)));
        assert_eq!(Value::from("n/a").to_decimal(), None);
        assert_eq!(Value::from(f64::INFINITY).to_decimal(), None);
        assert_eq!(Value::Null.to_decimal(), None);
    }

    #[test]
    fn test_to_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(Value::from("2024-03-15").to_date(), Some(expected));
        assert_eq!(Value::from("2024-03-15T10:30:00Z").to_date(), Some(expected));
        assert_eq!(Value::from("2024-03-15T10:30:00").to_date(), Some(expected));
        assert_eq!(Value::from("next week").to_date(), None);
        assert_eq!(Value::from(3i64).to_date(), None);
    }
}
