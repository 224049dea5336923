//! Dynamic CRM record (one table row)

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Value;
use super::types::Money;
use super::value::parse_date;
use crate::error::FieldError;

/// Field that carries a record's stable numeric identifier.
pub const ID_FIELD: &str = "Id";

/// A dynamic CRM record: client, policy, lead, task or activity.
///
/// Records hold field values as a `HashMap<String, Value>`. The `Id` field is
/// stored like any other field so it can be shown and sorted as a column;
/// [`Record::id`] reads it back as a `u64`.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::Record;
///
/// let record = Record::with_id(7)
///     .set("name", "Jane Doe")
///     .set("premium", 1_250i64);
///
/// assert_eq!(record.id(), Some(7));
/// assert_eq!(record.get_string("name").unwrap(), Some("Jane Doe"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given ID.
    pub fn with_id(id: u64) -> Self {
        Self::new().set(ID_FIELD, id)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Returns the record ID, if set and non-negative.
    pub fn id(&self) -> Option<u64> {
        match self.fields.get(ID_FIELD)? {
            Value::Int(n) => u64::try_from(*n).ok(),
            Value::Long(n) => u64::try_from(*n).ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: u64) {
        self.fields.insert(ID_FIELD.to_string(), Value::from(id));
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Number of fields, `Id` included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Overlays every field of `patch` onto this record, except `Id`.
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in &patch.fields {
            if key != ID_FIELD {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an i64 field value.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as i64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)),
            Some(Value::Long(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets any numeric field value as a decimal.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(value) if value.is_numeric() => value
                .to_decimal()
                .map(Some)
                .ok_or_else(|| FieldError::unparseable(field, "decimal", value.to_string())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "decimal",
                other.type_name(),
            )),
        }
    }

    /// Gets any numeric field value as money.
    pub fn get_money(&self, field: &str) -> Result<Option<Money>, FieldError> {
        Ok(self.get_decimal(field)?.map(Money::new))
    }

    /// Gets a calendar date, accepting dates, timestamps and ISO date text.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::DateTime(dt)) => Ok(Some(dt.date_naive())),
            Some(Value::String(s)) => parse_date(s)
                .map(Some)
                .ok_or_else(|| FieldError::unparseable(field, "date", s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let mut record = Record::new();
        assert_eq!(record.id(), None);
        record.set_id(42);
        assert_eq!(record.id(), Some(42));
        assert_eq!(record.get(ID_FIELD), Some(&Value::Long(42)));
    }

    #[test]
    fn test_negative_id_is_not_an_id() {
        let record = Record::new().set(ID_FIELD, -1i64);
        assert_eq!(record.id(), None);
    }

    #[test]
    fn test_typed_getters() {
        let record = Record::with_id(1)
            .set("name", "Jane")
            .set("premium", 1200i32)
            .set("renewalDate", "2025-01-31")
            .set("notes", Value::Null);

        assert_eq!(record.get_string("name").unwrap(), Some("Jane"));
        assert_eq!(record.get_long("premium").unwrap(), Some(1200));
        assert_eq!(record.get_money("premium").unwrap(), Some(Money::from_int(1200)));
        assert_eq!(
            record.get_date("renewalDate").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(record.get_string("notes").unwrap(), None);
    }

    #[test]
    fn test_getter_errors() {
        let record = Record::with_id(1).set("name", "Jane").set("due", "soon");

        assert_eq!(record.get_string("email"), Err(FieldError::missing("email")));
        assert_eq!(
            record.get_bool("name"),
            Err(FieldError::type_mismatch("name", "bool", "string"))
        );
        assert_eq!(
            record.get_date("due"),
            Err(FieldError::unparseable("due", "date", "soon"))
        );
    }

    #[test]
    fn test_merge_keeps_id() {
        let mut record = Record::with_id(3).set("stage", "prospect").set("value", 100i64);
        let patch = Record::with_id(99).set("stage", "quoted");

        record.merge(&patch);

        assert_eq!(record.id(), Some(3));
        assert_eq!(record.get_string("stage").unwrap(), Some("quoted"));
        assert_eq!(record.get_long("value").unwrap(), Some(100));
    }
}
