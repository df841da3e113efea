//! Pagination cursor and the page clamp rule.

/// Pagination cursor of a server-paged table.
///
/// `page_index < total_pages` holds whenever `total_pages > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationState {
    /// Current page (0-based).
    pub page_index: usize,
    /// Rows per page, always greater than zero.
    pub page_size: usize,
    /// Number of pages reported or derived from the last fetch.
    pub total_pages: usize,
    /// Number of rows across all pages.
    pub total_rows: usize,
}

impl PaginationState {
    /// Creates a cursor at the first page with no known rows.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
            total_pages: 0,
            total_rows: 0,
        }
    }

    /// Clamps a requested page index into the valid range of this cursor.
    pub fn safe_page(&self, requested: Option<i64>) -> usize {
        clamp_page(requested, self.page_index, self.total_pages)
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages
    }

    /// Returns `true` if `page_index` addresses an existing page.
    pub fn contains(&self, page_index: usize) -> bool {
        page_index < self.total_pages
    }
}

/// Restricts a requested page index to `[0, total_pages - 1]`.
///
/// `None` stands for input that is not a number and keeps `current`. With no
/// pages at all the only valid index is 0.
pub fn clamp_page(requested: Option<i64>, current: usize, total_pages: usize) -> usize {
    let Some(requested) = requested else {
        return current;
    };
    let last = total_pages.saturating_sub(1);
    if requested <= 0 {
        0
    } else {
        usize::try_from(requested).map_or(last, |page| page.min(last))
    }
}

/// Number of pages needed for `total_rows` rows at `page_size` rows per page.
pub fn total_pages_for(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_rows.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_within_range() {
        assert_eq!(clamp_page(Some(3), 0, 10), 3);
        assert_eq!(clamp_page(Some(9), 0, 10), 9);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(clamp_page(Some(-4), 2, 10), 0);
        assert_eq!(clamp_page(Some(42), 2, 10), 9);
        assert_eq!(clamp_page(Some(i64::MAX), 2, 10), 9);
    }

    #[test]
    fn test_clamp_not_a_number_keeps_current() {
        assert_eq!(clamp_page(None, 4, 10), 4);
    }

    #[test]
    fn test_clamp_without_pages() {
        assert_eq!(clamp_page(Some(5), 0, 0), 0);
        assert_eq!(clamp_page(Some(-1), 0, 0), 0);
    }

    #[test]
    fn test_total_pages_for() {
        assert_eq!(total_pages_for(101, 10), 11);
        assert_eq!(total_pages_for(100, 10), 10);
        assert_eq!(total_pages_for(0, 10), 0);
        assert_eq!(total_pages_for(5, 0), 0);
    }

    #[test]
    fn test_navigation_bounds() {
        let state = PaginationState {
            page_index: 0,
            page_size: 10,
            total_pages: 3,
            total_rows: 25,
        };
        assert!(!state.has_previous());
        assert!(state.has_next());
        assert!(state.contains(2));
        assert!(!state.contains(3));

        let last = PaginationState {
            page_index: 2,
            ..state
        };
        assert!(last.has_previous());
        assert!(!last.has_next());
    }
}
