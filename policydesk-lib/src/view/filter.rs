//! Row filters applied before rows reach a view.
//!
//! Filters never modify their input; they return the matching rows as a new
//! snapshot, ready for [`TableView::set_rows`](super::TableView::set_rows).

use crate::model::Record;

/// Returns `true` if any of `fields` contains `term`, ignoring case.
///
/// An empty term matches every record. Missing fields never match.
pub fn matches_search(record: &Record, term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields.iter().any(|field| {
        record
            .get(field)
            .filter(|value| !value.is_null())
            .is_some_and(|value| value.to_string().to_lowercase().contains(&needle))
    })
}

/// Case-insensitive substring search across `fields`.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::Record;
/// use policydesk_lib::view::filter;
///
/// let clients = vec![
///     Record::with_id(1).set("name", "Jane Doe").set("email", "jane@example.com"),
///     Record::with_id(2).set("name", "Amir Khan").set("email", "amir@example.com"),
/// ];
///
/// let found = filter::search(&clients, "DOE", &["name", "email"]);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id(), Some(1));
/// ```
pub fn search(rows: &[Record], term: &str, fields: &[&str]) -> Vec<Record> {
    rows.iter()
        .filter(|record| matches_search(record, term, fields))
        .cloned()
        .collect()
}

/// Returns `true` if `field`'s text equals `expected`, ignoring case.
pub fn field_matches(record: &Record, field: &str, expected: &str) -> bool {
    record
        .get(field)
        .is_some_and(|value| value.to_string().eq_ignore_ascii_case(expected))
}

/// Rows whose `field` equals `expected`, ignoring case.
pub fn field_equals(rows: &[Record], field: &str, expected: &str) -> Vec<Record> {
    rows.iter()
        .filter(|record| field_matches(record, field, expected))
        .cloned()
        .collect()
}

/// Rows accepted by an arbitrary predicate.
pub fn retain_where<F>(rows: &[Record], mut predicate: F) -> Vec<Record>
where
    F: FnMut(&Record) -> bool,
{
    rows.iter().filter(|record| predicate(record)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn policies() -> Vec<Record> {
        vec![
            Record::with_id(1)
                .set("policyNumber", "POL-001")
                .set("type", "Auto")
                .set("provider", "StateFarm")
                .set("status", "Active"),
            Record::with_id(2)
                .set("policyNumber", "POL-002")
                .set("type", "Home")
                .set("provider", "Allstate")
                .set("status", "Expired"),
            Record::with_id(3)
                .set("policyNumber", "POL-003")
                .set("type", "Life")
                .set("provider", Value::Null)
                .set("status", "active"),
        ]
    }

    fn ids(rows: &[Record]) -> Vec<u64> {
        rows.iter().filter_map(Record::id).collect()
    }

    #[test]
    fn test_search_any_field() {
        let rows = policies();
        assert_eq!(ids(&search(&rows, "home", &["type", "provider"])), vec![2]);
        assert_eq!(ids(&search(&rows, "pol-00", &["policyNumber"])), vec![1, 2, 3]);
        assert_eq!(ids(&search(&rows, "farm", &["type"])), Vec::<u64>::new());
    }

    #[test]
    fn test_empty_term_keeps_all() {
        let rows = policies();
        assert_eq!(search(&rows, "", &["type"]), rows);
    }

    #[test]
    fn test_null_fields_do_not_match() {
        let rows = policies();
        assert!(!matches_search(&rows[2], "null", &["provider"]));
    }

    #[test]
    fn test_field_equals_ignores_case() {
        let rows = policies();
        assert_eq!(ids(&field_equals(&rows, "status", "ACTIVE")), vec![1, 3]);
        assert_eq!(ids(&field_equals(&rows, "missing", "x")), Vec::<u64>::new());
    }

    #[test]
    fn test_retain_where() {
        let rows = policies();
        let odd = retain_where(&rows, |r| r.id().is_some_and(|id| id % 2 == 1));
        assert_eq!(ids(&odd), vec![1, 3]);
    }
}
