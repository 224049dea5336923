//! Stateful table view: owns a row snapshot plus sort and page state.

use log::debug;
use log::trace;

use super::Column;
use super::PageState;
use super::RenderedView;
use super::SortState;
use super::ViewConfig;
use super::render;
use super::render_unpaged;
use super::validate_columns;
use crate::error::ValidationError;
use crate::model::Record;

type RowCallback = Box<dyn FnMut(&Record) + Send>;
type SortCallback = Box<dyn FnMut(&SortState) + Send>;
type PageCallback = Box<dyn FnMut(&PageState) + Send>;

/// A table over one snapshot of rows.
///
/// The view never edits the rows. Supplying a new snapshot with
/// [`set_rows`](Self::set_rows) resets sorting and paging to their defaults.
/// Selection belongs to the caller: clicks are reported through
/// [`on_row_click`](Self::on_row_click) and nothing is remembered.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::Record;
/// use policydesk_lib::view::{Column, ColumnKind, TableView, ViewConfig};
///
/// let columns = vec![
///     Column::new("name", "Name"),
///     Column::new("premium", "Premium").kind(ColumnKind::Currency),
/// ];
/// let mut table = TableView::new(columns, ViewConfig::default()).unwrap();
/// table.set_rows(vec![
///     Record::with_id(1).set("name", "Jane").set("premium", 1200i64),
///     Record::with_id(2).set("name", "Amir").set("premium", 950i64),
/// ]);
///
/// table.toggle_sort("premium").unwrap();
/// let view = table.render().unwrap();
/// assert_eq!(view.rows[0].cells[1].as_text(), "$950.00");
/// ```
pub struct TableView {
    columns: Vec<Column>,
    config: ViewConfig,
    rows: Vec<Record>,
    sort: SortState,
    page: PageState,
    on_row_click: Option<RowCallback>,
    on_sort: Option<SortCallback>,
    on_page: Option<PageCallback>,
}

impl TableView {
    /// Creates an empty view.
    ///
    /// # Errors
    ///
    /// Empty or duplicated column schema, or a zero page size.
    pub fn new(columns: Vec<Column>, config: ViewConfig) -> Result<Self, ValidationError> {
        validate_columns(&columns)?;
        let page = PageState::first(config.page_size)?;
        Ok(Self {
            columns,
            config,
            rows: Vec::new(),
            sort: SortState::default(),
            page,
            on_row_click: None,
            on_sort: None,
            on_page: None,
        })
    }

    /// Registers the row-click callback.
    pub fn on_row_click(mut self, callback: impl FnMut(&Record) + Send + 'static) -> Self {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    /// Registers the callback run after every sort change.
    pub fn on_sort(mut self, callback: impl FnMut(&SortState) + Send + 'static) -> Self {
        self.on_sort = Some(Box::new(callback));
        self
    }

    /// Registers the callback run after every page change.
    pub fn on_page(mut self, callback: impl FnMut(&PageState) + Send + 'static) -> Self {
        self.on_page = Some(Box::new(callback));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The current row snapshot, in input order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    /// Pages available for the current rows.
    pub fn total_pages(&self) -> usize {
        if self.config.pagination {
            PageState::total_pages(self.rows.len(), self.page.page_size())
        } else {
            usize::from(!self.rows.is_empty())
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Replaces the row snapshot and resets sort and page state.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        debug!("table: {} rows loaded, state reset", rows.len());
        self.rows = rows;
        self.sort = SortState::default();
        self.page = PageState::first(self.config.page_size).unwrap_or_default();
    }

    /// Header click on `key`.
    ///
    /// Returns `Ok(false)` without changing anything when sorting is disabled
    /// or the column is not sortable.
    pub fn toggle_sort(&mut self, key: &str) -> Result<bool, ValidationError> {
        let column = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| ValidationError::unknown_column(key))?;

        if !self.config.sortable || !column.sortable {
            trace!("table: sort on '{}' ignored", key);
            return Ok(false);
        }

        self.sort = self.sort.toggle(key);
        debug!("table: sort {:?} {:?}", self.sort.key(), self.sort.direction());
        if let Some(callback) = self.on_sort.as_mut() {
            callback(&self.sort);
        }
        Ok(true)
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let next = self.page.next(self.rows.len());
        self.set_page(next)
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        let previous = self.page.previous();
        self.set_page(previous)
    }

    /// Jumps to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) -> Result<bool, ValidationError> {
        let target = self.page.go_to(page, self.rows.len())?;
        Ok(self.set_page(target))
    }

    /// Changes the page size, keeping the current page when still valid.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<bool, ValidationError> {
        let resized = self.page.with_page_size(page_size, self.rows.len())?;
        self.config.page_size = page_size;
        Ok(self.set_page(resized))
    }

    fn set_page(&mut self, page: PageState) -> bool {
        if page == self.page {
            return false;
        }
        self.page = page;
        trace!("table: page {}", page.current_page());
        if let Some(callback) = self.on_page.as_mut() {
            callback(&self.page);
        }
        true
    }

    // =========================================================================
    // Rendering and selection
    // =========================================================================

    /// Renders the current page.
    pub fn render(&self) -> Result<RenderedView<'_>, ValidationError> {
        view_of(&self.rows, &self.columns, &self.sort, &self.page, &self.config)
    }

    /// Reports a click on the `index`-th visible row.
    ///
    /// Returns `Ok(false)` when no row is shown at that position.
    pub fn click_row(&mut self, index: usize) -> Result<bool, ValidationError> {
        let view = view_of(&self.rows, &self.columns, &self.sort, &self.page, &self.config)?;
        let Some(row) = view.rows.into_iter().nth(index) else {
            return Ok(false);
        };
        if let Some(callback) = self.on_row_click.as_mut() {
            callback(row.record);
        }
        Ok(true)
    }
}

fn view_of<'a>(
    rows: &'a [Record],
    columns: &[Column],
    sort: &SortState,
    page: &PageState,
    config: &ViewConfig,
) -> Result<RenderedView<'a>, ValidationError> {
    if config.pagination {
        render(rows, columns, sort, page)
    } else {
        render_unpaged(rows, columns, sort)
    }
}

impl std::fmt::Debug for TableView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("page", &self.page)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::view::Direction;

    fn rows(n: u64) -> Vec<Record> {
        (1..=n).map(|i| Record::with_id(i).set("n", i as i64)).collect()
    }

    fn table(config: ViewConfig) -> TableView {
        let columns = vec![Column::new("n", "N"), Column::new("x", "X").not_sortable()];
        TableView::new(columns, config).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            TableView::new(vec![], ViewConfig::default()).unwrap_err(),
            ValidationError::NoColumns
        );
        assert_eq!(
            TableView::new(vec![Column::new("a", "A")], ViewConfig::default().with_page_size(0))
                .unwrap_err(),
            ValidationError::ZeroPageSize
        );
    }

    #[test]
    fn test_set_rows_resets_state() {
        let mut table = table(ViewConfig::default());
        table.set_rows(rows(30));
        table.toggle_sort("n").unwrap();
        table.next_page();
        assert_eq!(table.page_state().current_page(), 2);

        table.set_rows(rows(5));
        assert_eq!(table.sort_state(), &SortState::unsorted());
        assert_eq!(table.page_state().current_page(), 1);
        assert_eq!(table.page_state().page_size(), 10);
    }

    #[test]
    fn test_toggle_sort_rules() {
        let mut table = table(ViewConfig::default());
        assert_eq!(table.toggle_sort("n"), Ok(true));
        assert_eq!(table.sort_state().direction(), Direction::Asc);
        assert_eq!(table.toggle_sort("n"), Ok(true));
        assert_eq!(table.sort_state().direction(), Direction::Desc);
        assert_eq!(table.toggle_sort("x"), Ok(false));
        assert_eq!(table.sort_state(), &SortState::desc("n"));
        assert_eq!(
            table.toggle_sort("nope"),
            Err(ValidationError::unknown_column("nope"))
        );
    }

    #[test]
    fn test_sorting_disabled_globally() {
        let mut table = table(ViewConfig::default().with_sorting(false));
        assert_eq!(table.toggle_sort("n"), Ok(false));
        assert_eq!(table.sort_state().key(), None);
    }

    #[test]
    fn test_callbacks_receive_updated_state() {
        let sorts = Arc::new(Mutex::new(Vec::new()));
        let pages = Arc::new(Mutex::new(Vec::new()));
        let clicks = Arc::new(Mutex::new(Vec::new()));

        let (s, p, c) = (sorts.clone(), pages.clone(), clicks.clone());
        let mut table = table(ViewConfig::default().with_page_size(4))
            .on_sort(move |state| s.lock().unwrap().push(state.clone()))
            .on_page(move |state| p.lock().unwrap().push(state.current_page()))
            .on_row_click(move |row| c.lock().unwrap().push(row.id()));
        table.set_rows(rows(10));

        table.toggle_sort("n").unwrap();
        table.toggle_sort("n").unwrap();
        assert!(table.next_page());
        assert_eq!(table.click_row(0), Ok(true));
        assert_eq!(table.click_row(10), Ok(false));

        assert_eq!(
            *sorts.lock().unwrap(),
            vec![SortState::asc("n"), SortState::desc("n")]
        );
        assert_eq!(*pages.lock().unwrap(), vec![2]);
        // Descending, second page of four: 6,5,4,3
        assert_eq!(*clicks.lock().unwrap(), vec![Some(6)]);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut table = table(ViewConfig::default());
        table.set_rows(rows(25));
        assert!(!table.previous_page());
        assert!(table.go_to_page(3).unwrap());
        assert!(!table.next_page());
        assert_eq!(table.render().unwrap().rows.len(), 5);
        assert_eq!(table.go_to_page(0), Err(ValidationError::ZeroPage));
    }

    #[test]
    fn test_page_size_change_clamps() {
        let mut table = table(ViewConfig::default());
        table.set_rows(rows(25));
        table.go_to_page(3).unwrap();
        assert!(table.set_page_size(20).unwrap());
        assert_eq!(table.page_state().current_page(), 2);
        assert_eq!(table.total_pages(), 2);
    }

    #[test]
    fn test_pagination_disabled() {
        let mut table = table(ViewConfig::default().with_pagination(false));
        table.set_rows(rows(25));
        let view = table.render().unwrap();
        assert_eq!(view.rows.len(), 25);
        assert_eq!(table.total_pages(), 1);
    }

    #[test]
    fn test_rows_are_not_mutated() {
        let mut table = table(ViewConfig::default());
        let input = rows(12);
        table.set_rows(input.clone());
        table.toggle_sort("n").unwrap();
        table.toggle_sort("n").unwrap();
        table.render().unwrap();
        assert_eq!(table.rows(), input.as_slice());
    }
}
