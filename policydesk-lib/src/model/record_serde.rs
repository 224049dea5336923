//! Custom serialization for Record.
//!
//! Records travel as flat JSON objects, both in fixture files and in backend
//! payloads:
//!
//! ```json
//! { "Id": 3, "policyNumber": "POL-003", "premium": 1250.5, "renewalDate": "2025-01-31" }
//! ```
//!
//! ## Read Format (Deserialization)
//!
//! - Integers become `Int` when they fit in 32 bits, `Long` otherwise
//! - RFC 3339 strings become `DateTime`, `YYYY-MM-DD` strings become `Date`
//! - Arrays and objects are kept as `Json`
//!
//! ## Write Format (Serialization)
//!
//! - `Null` fields are skipped
//! - `Date` writes back as `YYYY-MM-DD`, `DateTime` as RFC 3339
//! - `Decimal` and `Money` write as JSON numbers, so they read back numeric

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        // Sorted keys keep output stable across runs
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();

        for key in keys {
            match &self.fields[key] {
                Value::Null => {}
                Value::Date(d) => map.serialize_entry(key, &d.format("%Y-%m-%d").to_string())?,
                Value::DateTime(dt) => map.serialize_entry(key, &dt.to_rfc3339())?,
                other => map.serialize_entry(key, other)?,
            }
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a CRM record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.fields.insert(key, json_value_to_value(value));
        }

        Ok(record)
    }
}

/// Converts a serde_json::Value to our Value enum.
pub(crate) fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Value::Int(small),
                    Err(_) => Value::Long(i),
                }
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                Value::DateTime(dt.with_timezone(&chrono::Utc))
            } else if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                Value::Date(d)
            } else {
                Value::String(s)
            }
        }
        other => Value::Json(other),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::types::Money;

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"Id": 3, "name": "Jane Doe", "premium": 1250.5, "active": true}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), Some(3));
        assert_eq!(record.get_string("name").unwrap(), Some("Jane Doe"));
        assert_eq!(record.get_float("premium").unwrap(), Some(1250.5));
        assert_eq!(record.get_bool("active").unwrap(), Some(true));
    }

    #[test]
    fn test_deserialize_dates() {
        let json = r#"{"renewalDate": "2025-01-31", "createdAt": "2024-06-01T09:00:00Z"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert!(matches!(record.get("renewalDate"), Some(Value::Date(_))));
        assert!(matches!(record.get("createdAt"), Some(Value::DateTime(_))));
    }

    #[test]
    fn test_deserialize_large_and_nested() {
        let json = r#"{"big": 9000000000, "tags": ["auto", "home"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get("big"), Some(&Value::Long(9_000_000_000)));
        assert!(matches!(record.get("tags"), Some(Value::Json(_))));
    }

    #[test]
    fn test_serialize_skips_null_and_formats_dates() {
        let record = Record::with_id(1)
            .set("due", NaiveDate::from_ymd_opt(2025, 2, 1).unwrap())
            .set("notes", Value::Null);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Id":1,"due":"2025-02-01"}"#);
    }

    #[test]
    fn test_decimals_write_as_numbers() {
        let record = Record::with_id(4)
            .set("premium", Money::new(Decimal::new(12505, 1)))
            .set("deductible", Decimal::new(500, 0));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Id":4,"deductible":500,"premium":1250.5}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("premium"), Some(&Value::Float(1250.5)));
        assert_eq!(back.get("deductible"), Some(&Value::Int(500)));
        assert_eq!(back.get_money("premium").unwrap(), Some(Money::new(Decimal::new(12505, 1))));
    }
}
