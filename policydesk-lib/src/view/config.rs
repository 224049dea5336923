//! View configuration

use serde::Deserialize;
use serde::Serialize;

use super::DEFAULT_PAGE_SIZE;

/// Behaviour switches for a [`TableView`](super::TableView).
///
/// # Example
///
/// ```
/// use policydesk_lib::view::ViewConfig;
///
/// let config = ViewConfig::default()
///     .with_page_size(25)
///     .with_sorting(false);
///
/// let from_json: ViewConfig = serde_json::from_str(r#"{"page_size": 5}"#).unwrap();
/// assert!(from_json.sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Whether header clicks sort at all.
    ///
    /// Default: true
    pub sortable: bool,

    /// Whether rows are split into pages. When off, every row is visible.
    ///
    /// Default: true
    pub pagination: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sortable: true,
            pagination: true,
        }
    }
}

impl ViewConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enables or disables sorting.
    pub fn with_sorting(mut self, enabled: bool) -> Self {
        self.sortable = enabled;
        self
    }

    /// Enables or disables pagination.
    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }
}
