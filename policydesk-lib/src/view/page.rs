//! Page state and slice arithmetic.

use std::ops::Range;

use serde::Serialize;

use crate::error::ValidationError;

/// Rows per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page (1-based) and page size.
///
/// Both values are at least 1; the constructors reject zero.
///
/// # Example
///
/// ```
/// use policydesk_lib::view::PageState;
///
/// let page = PageState::new(3, 10).unwrap();
/// assert_eq!(PageState::total_pages(25, 10), 3);
/// assert_eq!(page.bounds(25), 20..25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Creates a page state.
    pub fn new(current_page: usize, page_size: usize) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        if current_page == 0 {
            return Err(ValidationError::ZeroPage);
        }
        Ok(Self {
            current_page,
            page_size,
        })
    }

    /// First page with the given size.
    pub fn first(page_size: usize) -> Result<Self, ValidationError> {
        Self::new(1, page_size)
    }

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `row_count` rows. Zero rows means zero pages.
    pub fn total_pages(row_count: usize, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        row_count.div_ceil(page_size)
    }

    /// Highest valid page for `row_count` rows (at least 1).
    fn last_page(&self, row_count: usize) -> usize {
        Self::total_pages(row_count, self.page_size).max(1)
    }

    /// Same size, current page pulled back inside `[1, last page]`.
    pub fn clamped(&self, row_count: usize) -> Self {
        Self {
            current_page: self.current_page.min(self.last_page(row_count)),
            page_size: self.page_size,
        }
    }

    /// Index range of the current page within `row_count` rows.
    ///
    /// Empty when the page lies beyond the data.
    pub fn bounds(&self, row_count: usize) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(row_count);
        let end = start.saturating_add(self.page_size).min(row_count);
        start..end
    }

    /// Next page, stopping at the last one.
    pub fn next(&self, row_count: usize) -> Self {
        Self {
            current_page: self.current_page.saturating_add(1).min(self.last_page(row_count)),
            page_size: self.page_size,
        }
    }

    /// Previous page, stopping at the first one.
    pub fn previous(&self) -> Self {
        Self {
            current_page: self.current_page.saturating_sub(1).max(1),
            page_size: self.page_size,
        }
    }

    /// Jumps to `page`, clamped to the available pages.
    pub fn go_to(&self, page: usize, row_count: usize) -> Result<Self, ValidationError> {
        Ok(Self::new(page, self.page_size)?.clamped(row_count))
    }

    /// Same page, new size, clamped to the available pages.
    pub fn with_page_size(&self, page_size: usize, row_count: usize) -> Result<Self, ValidationError> {
        Ok(Self::new(self.current_page, page_size)?.clamped(row_count))
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero() {
        assert_eq!(PageState::new(1, 0), Err(ValidationError::ZeroPageSize));
        assert_eq!(PageState::new(0, 10), Err(ValidationError::ZeroPage));
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for size in 1..=7 {
            for n in 0..=50 {
                let expected = (n + size - 1) / size;
                assert_eq!(PageState::total_pages(n, size), expected, "n={n} size={size}");
            }
        }
        assert_eq!(PageState::total_pages(0, 10), 0);
        assert_eq!(PageState::total_pages(25, 10), 3);
    }

    #[test]
    fn test_bounds_cover_every_row_once() {
        for size in 1..=6 {
            for n in 0..=20 {
                let pages = PageState::total_pages(n, size);
                let covered: Vec<usize> = (1..=pages)
                    .flat_map(|p| PageState::new(p, size).unwrap().bounds(n))
                    .collect();
                assert_eq!(covered, (0..n).collect::<Vec<_>>(), "n={n} size={size}");
            }
        }
    }

    #[test]
    fn test_bounds_past_the_end_are_empty() {
        let page = PageState::new(5, 10).unwrap();
        assert!(page.bounds(25).is_empty());
    }

    #[test]
    fn test_clamped() {
        let page = PageState::new(5, 10).unwrap();
        assert_eq!(page.clamped(25).current_page(), 3);
        assert_eq!(page.clamped(0).current_page(), 1);
        assert_eq!(page.clamped(100).current_page(), 5);
    }

    #[test]
    fn test_navigation_stops_at_edges() {
        let page = PageState::first(10).unwrap();
        assert_eq!(page.previous().current_page(), 1);
        let page = page.next(25).next(25).next(25);
        assert_eq!(page.current_page(), 3);
        assert_eq!(page.previous().current_page(), 2);
        assert_eq!(PageState::first(10).unwrap().next(0).current_page(), 1);
    }

    #[test]
    fn test_next_at_largest_page_does_not_overflow() {
        let page = PageState::new(usize::MAX, 1).unwrap();
        assert_eq!(page.next(usize::MAX).current_page(), usize::MAX);
        assert_eq!(page.next(3).current_page(), 3);
        assert_eq!(page.bounds(usize::MAX), usize::MAX - 1..usize::MAX);
    }

    #[test]
    fn test_resize_clamps() {
        let page = PageState::new(3, 10).unwrap();
        let resized = page.with_page_size(25, 25).unwrap();
        assert_eq!(resized.current_page(), 1);
        assert_eq!(resized.page_size(), 25);
        assert_eq!(page.with_page_size(0, 25), Err(ValidationError::ZeroPageSize));
    }
}
