//! Tabular view engine.
//!
//! Turns a snapshot of [`Record`](crate::model::Record) rows plus a column
//! schema into a sorted, paginated, formatted page of cells.
//!
//! # Pieces
//!
//! - [`Column`] / [`ColumnKind`] - schema entry and its closed set of renderers
//! - [`SortState`] / [`Direction`] - active sort key and comparator polarity
//! - [`PageState`] - current page and page size
//! - [`render`] - the pure `rows × columns × sort × page → view` function
//! - [`TableView`] - stateful wrapper that owns the rows and the sort/page
//!   state and reports clicks, sort toggles and page moves to callbacks
//! - [`filter`] - substring search and field-equality filters applied before
//!   rows are handed to a view

mod column;
mod config;
pub mod filter;
mod format;
mod order;
mod page;
mod render;
mod status;
mod table;

pub use column::*;
pub use config::*;
pub use format::format_value;
pub use order::*;
pub use page::*;
pub use render::*;
pub use status::*;
pub use table::*;
