//! Sort state and the natural value ordering used by the view.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies this direction's polarity to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active sort column and direction.
///
/// # Example
///
/// ```
/// use policydesk_lib::view::{Direction, SortState};
///
/// let sort = SortState::default().toggle("name");
/// assert_eq!(sort.key(), Some("name"));
/// assert_eq!(sort.direction(), Direction::Asc);
///
/// let sort = sort.toggle("name");
/// assert_eq!(sort.direction(), Direction::Desc);
///
/// let sort = sort.toggle("premium");
/// assert_eq!(sort.key(), Some("premium"));
/// assert_eq!(sort.direction(), Direction::Asc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    key: Option<String>,
    direction: Direction,
}

impl SortState {
    /// Unsorted state (rows keep their input order).
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by a column in the given direction.
    pub fn by(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Ascending sort by a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::by(key, Direction::Asc)
    }

    /// Descending sort by a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::by(key, Direction::Desc)
    }

    /// The sorted column key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction if `key` is the active sort column.
    ///
    /// Drives the header's up/down indicators.
    pub fn indicator(&self, key: &str) -> Option<Direction> {
        (self.key() == Some(key)).then_some(self.direction)
    }

    /// Next state after a header click on `key`.
    ///
    /// Clicking the active column flips its direction; clicking any other
    /// column sorts it ascending.
    pub fn toggle(&self, key: &str) -> Self {
        match self.indicator(key) {
            Some(direction) => Self::by(key, direction.flipped()),
            None => Self::asc(key),
        }
    }
}

// =============================================================================
// Natural ordering
// =============================================================================

/// Ordering key for one value. Variant order ranks mixed types.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Bool(bool),
    Number(NumberKey),
    Date(NaiveDateTime),
    Text(&'a str),
    Json(String),
}

/// Total order over numbers, floats included.
///
/// Compares the nearest `f64` first (`total_cmp`), then the exact decimal when
/// both sides have one. Floats outside the decimal range keep their float
/// order; NaN sorts above every number.
#[derive(Debug)]
struct NumberKey {
    approx: f64,
    exact: Option<Decimal>,
}

impl NumberKey {
    fn float(f: f64) -> Self {
        let approx = if f.is_nan() {
            f.abs()
        } else if f == 0.0 {
            0.0
        } else {
            f
        };
        Self {
            approx,
            exact: Decimal::from_f64_retain(approx),
        }
    }

    fn decimal(d: Decimal) -> Self {
        Self {
            approx: d.to_f64().unwrap_or(f64::NAN),
            exact: Some(d),
        }
    }
}

impl Ord for NumberKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.approx
            .total_cmp(&other.approx)
            .then_with(|| self.exact.cmp(&other.exact))
    }
}

impl PartialOrd for NumberKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NumberKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumberKey {}

fn sort_key(value: &Value) -> Option<SortKey<'_>> {
    let key = match value {
        Value::Null => return None,
        Value::Bool(b) => SortKey::Bool(*b),
        Value::Float(f) => SortKey::Number(NumberKey::float(*f)),
        Value::Int(_) | Value::Long(_) | Value::Decimal(_) | Value::Money(_) => {
            SortKey::Number(NumberKey::decimal(value.to_decimal()?))
        }
        Value::Date(d) => SortKey::Date(d.and_time(NaiveTime::MIN)),
        Value::DateTime(dt) => SortKey::Date(dt.naive_utc()),
        Value::String(s) => SortKey::Text(s),
        Value::Json(j) => SortKey::Json(j.to_string()),
    };
    Some(key)
}

/// Ascending natural ordering of two field values.
///
/// Numbers compare numerically, dates chronologically, text by code point.
/// Values of different types order bool < number < date < text < json.
/// Missing and null values sort after everything else.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.and_then(sort_key);
    let b = b.and_then(sort_key);
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of borrowed rows by one field.
///
/// The direction flips the comparator, so rows with equal keys keep their
/// input order in both directions.
pub fn sort_rows<'a>(rows: &'a [Record], key: &str, direction: Direction) -> Vec<&'a Record> {
    let mut sorted: Vec<&Record> = rows.iter().collect();
    sorted.sort_by(|a, b| direction.apply(compare_values(a.get(key), b.get(key))));
    sorted
}
