//! Column schema and rendered cells.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::StatusStyle;
use crate::model::Record;
use crate::model::Value;

/// How a column renders its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Raw value text.
    #[default]
    Plain,
    /// Badge with a style looked up from the value.
    Status,
    /// US dollars with grouping and two decimals.
    Currency,
    /// Calendar date, `M/D/YYYY`.
    Date,
}

/// A single rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Nothing to show (missing value or a value that failed to format).
    Empty,
    /// Formatted text.
    Text(String),
    /// Status badge.
    Status { text: String, style: StatusStyle },
}

impl Cell {
    /// Creates a text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a status cell whose style comes from the status lookup.
    pub fn status(text: impl Into<String>) -> Self {
        let text = text.into();
        let style = StatusStyle::lookup(&text);
        Self::Status { text, style }
    }

    /// The text shown in the cell.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Text(text) | Self::Status { text, .. } => text,
        }
    }

    /// Returns `true` for [`Cell::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Custom cell formatter: receives the column's value (if present) and the
/// whole row.
pub type CellFormatter = Arc<dyn Fn(Option<&Value>, &Record) -> Cell + Send + Sync>;

/// Column configuration.
///
/// Columns are sortable unless marked otherwise. A custom formatter, when set,
/// replaces the kind-based rendering entirely.
///
/// # Examples
///
/// ```
/// use policydesk_lib::view::{Cell, Column, ColumnKind};
///
/// let columns = vec![
///     Column::new("policyNumber", "Policy Number"),
///     Column::new("premium", "Premium").kind(ColumnKind::Currency),
///     Column::new("renewalDate", "Renewal Date").kind(ColumnKind::Date),
///     Column::new("actions", "Actions")
///         .not_sortable()
///         .render(|_, row| Cell::text(format!("edit #{}", row.id().unwrap_or_default()))),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Record field shown in this column.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Renderer used when no custom formatter is set.
    pub kind: ColumnKind,
    /// Whether header clicks toggle sorting on this column.
    pub sortable: bool,
    formatter: Option<CellFormatter>,
}

impl Column {
    /// Creates a sortable plain column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Plain,
            sortable: true,
            formatter: None,
        }
    }

    /// Sets the column kind.
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Excludes the column from sorting.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Sets a custom formatter that overrides the kind.
    pub fn render<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Option<&Value>, &Record) -> Cell + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// The custom formatter, if any.
    pub fn formatter(&self) -> Option<&CellFormatter> {
        self.formatter.as_ref()
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("custom", &self.formatter.is_some())
            .finish()
    }
}
