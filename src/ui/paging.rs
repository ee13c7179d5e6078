use std::ops::Range;

use crate::ui::config::UI_CONFIG;

/// Page position within the table. The page index is clamped against the row
/// count on every query, so a shrinking dataset never leaves it out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePager {
    rows_per_page: usize,
    page: usize,
}

impl Default for TablePager {
    fn default() -> Self {
        Self::new(UI_CONFIG.default_rows_per_page)
    }
}

impl TablePager {
    /// Unsupported page sizes fall back to the default.
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = if UI_CONFIG.rows_per_page_options.contains(&rows_per_page) {
            rows_per_page
        } else {
            UI_CONFIG.default_rows_per_page
        };
        Self {
            rows_per_page,
            page: 0,
        }
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        *self = Self::new(rows_per_page);
    }

    /// Zero-based current page, clamped to `total_rows`.
    pub fn page(&self, total_rows: usize) -> usize {
        self.page.min(self.page_count(total_rows) - 1)
    }

    /// Always at least one, so an empty table still shows "1 / 1".
    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.rows_per_page).max(1)
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn next(&mut self, total_rows: usize) {
        self.page = (self.page(total_rows) + 1).min(self.page_count(total_rows) - 1);
    }

    pub fn prev(&mut self, total_rows: usize) {
        self.page = self.page(total_rows).saturating_sub(1);
    }

    /// Row indices on the current page.
    pub fn range(&self, total_rows: usize) -> Range<usize> {
        let start = self.page(total_rows) * self.rows_per_page;
        start.min(total_rows)..(start + self.rows_per_page).min(total_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ten_rows() {
        let pager = TablePager::default();
        assert_eq!(pager.rows_per_page(), 10);
        assert_eq!(pager.range(25), 0..10);
        assert_eq!(pager.page_count(25), 3);
    }

    #[test]
    fn unsupported_size_falls_back() {
        assert_eq!(TablePager::new(7).rows_per_page(), 10);
        assert_eq!(TablePager::new(20).rows_per_page(), 20);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut pager = TablePager::new(5);
        pager.prev(12);
        assert_eq!(pager.page(12), 0);

        pager.next(12);
        pager.next(12);
        pager.next(12);
        assert_eq!(pager.page(12), 2);
        assert_eq!(pager.range(12), 10..12);

        // Dataset shrank to one page
        assert_eq!(pager.range(3), 0..3);
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let pager = TablePager::new(5);
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.range(0), 0..0);
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut pager = TablePager::new(5);
        pager.next(30);
        pager.set_rows_per_page(20);
        assert_eq!(pager.page(30), 0);
        assert_eq!(pager.range(30), 0..20);
    }
}
