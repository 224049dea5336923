//! The pure render pass: sort, paginate, format.

use std::collections::HashSet;

use log::debug;

use super::Cell;
use super::Column;
use super::PageState;
use super::SortState;
use super::format_value;
use super::sort_rows;
use crate::error::ValidationError;
use crate::model::Record;

/// Key used to tell rendered rows apart: the record `Id`, or the row's
/// position on the page when the record has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(u64),
    Index(usize),
}

/// One visible row with its formatted cells, in column order.
#[derive(Debug, Clone)]
pub struct RenderedRow<'a> {
    pub key: RowKey,
    pub record: &'a Record,
    pub cells: Vec<Cell>,
}

/// Result of [`render`].
#[derive(Debug, Clone)]
pub struct RenderedView<'a> {
    /// Rows on the current page, sorted.
    pub rows: Vec<RenderedRow<'a>>,
    /// Number of rows before paging.
    pub total_rows: usize,
    /// `ceil(total_rows / page_size)`; zero for no rows.
    pub total_pages: usize,
    /// The page actually shown, after clamping.
    pub current_page: usize,
    /// Rows per page (equal to `total_rows` when paging is off).
    pub page_size: usize,
}

impl<'a> RenderedView<'a> {
    /// The visible records, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().map(|row| row.record)
    }

    /// 1-based inclusive `(first, last)` row numbers on this page, for
    /// "Showing 11 to 20 of 25 results". `None` when empty.
    pub fn showing(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Checks a column schema: at least one column, unique keys.
pub fn validate_columns(columns: &[Column]) -> Result<(), ValidationError> {
    if columns.is_empty() {
        return Err(ValidationError::NoColumns);
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(ValidationError::DuplicateColumn {
                key: column.key.clone(),
            });
        }
    }
    Ok(())
}

/// Renders one page of `rows`.
///
/// Sorts a borrowed copy of the rows when `sort` names a sortable column,
/// clamps the requested page into range, slices it, and formats every cell.
/// The input slice is never modified.
///
/// # Errors
///
/// [`ValidationError`] for an empty or duplicated column schema, or a sort key
/// that names no column.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::Record;
/// use policydesk_lib::view::{render, Column, PageState, SortState};
///
/// let rows = vec![
///     Record::with_id(1).set("name", "B").set("value", 10i64),
///     Record::with_id(2).set("name", "A").set("value", 20i64),
/// ];
/// let columns = vec![Column::new("name", "Name"), Column::new("value", "Value")];
///
/// let view = render(&rows, &columns, &SortState::asc("name"), &PageState::default()).unwrap();
/// let ids: Vec<_> = view.visible_rows().filter_map(|r| r.id()).collect();
/// assert_eq!(ids, vec![2, 1]);
/// assert_eq!(view.total_pages, 1);
/// ```
pub fn render<'a>(
    rows: &'a [Record],
    columns: &[Column],
    sort: &SortState,
    page: &PageState,
) -> Result<RenderedView<'a>, ValidationError> {
    render_inner(rows, columns, sort, Some(page))
}

/// Like [`render`], with every row on a single page.
pub fn render_unpaged<'a>(
    rows: &'a [Record],
    columns: &[Column],
    sort: &SortState,
) -> Result<RenderedView<'a>, ValidationError> {
    render_inner(rows, columns, sort, None)
}

fn render_inner<'a>(
    rows: &'a [Record],
    columns: &[Column],
    sort: &SortState,
    page: Option<&PageState>,
) -> Result<RenderedView<'a>, ValidationError> {
    validate_columns(columns)?;

    let sorted: Vec<&Record> = match sort.key() {
        Some(key) => {
            let column = columns
                .iter()
                .find(|c| c.key == key)
                .ok_or_else(|| ValidationError::unknown_column(key))?;
            if column.sortable {
                sort_rows(rows, key, sort.direction())
            } else {
                rows.iter().collect()
            }
        }
        None => rows.iter().collect(),
    };

    let total_rows = sorted.len();
    let (visible, total_pages, current_page, page_size) = match page {
        Some(page) => {
            let page = page.clamped(total_rows);
            let bounds = page.bounds(total_rows);
            (
                &sorted[bounds],
                PageState::total_pages(total_rows, page.page_size()),
                page.current_page(),
                page.page_size(),
            )
        }
        None => (
            &sorted[..],
            usize::from(total_rows > 0),
            1,
            total_rows,
        ),
    };

    let rows = visible
        .iter()
        .enumerate()
        .map(|(index, &record)| RenderedRow {
            key: record.id().map_or(RowKey::Index(index), RowKey::Id),
            record,
            cells: columns.iter().map(|column| render_cell(column, record)).collect(),
        })
        .collect();

    Ok(RenderedView {
        rows,
        total_rows,
        total_pages,
        current_page,
        page_size,
    })
}

/// Formats one cell, falling back to empty on a format failure.
pub fn render_cell(column: &Column, record: &Record) -> Cell {
    let value = record.get(&column.key);
    if let Some(formatter) = column.formatter() {
        return (**formatter)(value, record);
    }
    format_value(column.kind, value).unwrap_or_else(|err| {
        debug!("column '{}': {}", column.key, err);
        Cell::Empty
    })
}
