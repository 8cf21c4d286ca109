use std::ops::Range;

/// Page sizes offered by the lock table.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [2, 5, 10];
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// Client-side paging over a list whose length is only known at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    rows_per_page: usize,
}

impl Pagination {
    /// Start on the first page. Sizes that are not one of the options fall back to the default.
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = if ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            rows_per_page
        } else {
            DEFAULT_ROWS_PER_PAGE
        };
        Self {
            page: 0,
            rows_per_page,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Number of pages for `total` rows; an empty list still has one (empty) page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page).max(1)
    }

    /// Indices of the rows visible on the current page.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.rows_per_page).min(total);
        let end = (start + self.rows_per_page).min(total);
        start..end
    }

    /// The visible slice of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    /// Advance one page; returns false when already on the last page.
    pub fn next_page(&mut self, total: usize) -> bool {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self, total: usize) {
        self.page = self.page_count(total) - 1;
    }

    /// Switch to the next page size option and return to the first page.
    pub fn cycle_rows_per_page(&mut self) {
        let idx = ROWS_PER_PAGE_OPTIONS
            .iter()
            .position(|&n| n == self.rows_per_page)
            .unwrap_or(0);
        self.set_rows_per_page(ROWS_PER_PAGE_OPTIONS[(idx + 1) % ROWS_PER_PAGE_OPTIONS.len()]);
    }

    /// Change the page size; the page resets to the first one.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 0;
    }

    /// Keep the current page inside the list after it changed length.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// "6–10 of 12", or "0–0 of 0" for an empty list.
    pub fn label(&self, total: usize) -> String {
        let range = self.range(total);
        let from = if total == 0 { 0 } else { range.start + 1 };
        let to = range.end;
        format!("{from}\u{2013}{to} of {total}")
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_rows_first_page() {
        let p = Pagination::default();
        assert_eq!(p.page(), 0);
        assert_eq!(p.rows_per_page(), 5);
    }

    #[test]
    fn test_unknown_size_falls_back() {
        assert_eq!(Pagination::new(7).rows_per_page(), 5);
        assert_eq!(Pagination::new(10).rows_per_page(), 10);
    }

    #[test]
    fn test_slice_matches_page_window() {
        let items: Vec<u32> = (0..12).collect();
        let mut p = Pagination::new(5);
        assert_eq!(p.slice(&items), &[0, 1, 2, 3, 4]);
        assert!(p.next_page(items.len()));
        assert_eq!(p.slice(&items), &[5, 6, 7, 8, 9]);
        assert!(p.next_page(items.len()));
        assert_eq!(p.slice(&items), &[10, 11]);
        assert!(!p.next_page(items.len()));
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_prev_page_stops_at_zero() {
        let mut p = Pagination::new(2);
        assert!(!p.prev_page());
        p.next_page(10);
        assert!(p.prev_page());
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_empty_list() {
        let p = Pagination::default();
        let items: Vec<u32> = vec![];
        assert_eq!(p.page_count(0), 1);
        assert!(p.slice(&items).is_empty());
        assert_eq!(p.label(0), "0\u{2013}0 of 0");
    }

    #[test]
    fn test_label() {
        let mut p = Pagination::new(5);
        assert_eq!(p.label(12), "1\u{2013}5 of 12");
        p.next_page(12);
        p.next_page(12);
        assert_eq!(p.label(12), "11\u{2013}12 of 12");
    }

    #[test]
    fn test_changing_rows_per_page_resets_page() {
        let mut p = Pagination::new(2);
        p.next_page(10);
        p.next_page(10);
        assert_eq!(p.page(), 2);
        p.cycle_rows_per_page();
        assert_eq!(p.rows_per_page(), 5);
        assert_eq!(p.page(), 0);
        p.cycle_rows_per_page();
        assert_eq!(p.rows_per_page(), 10);
        p.cycle_rows_per_page();
        assert_eq!(p.rows_per_page(), 2);
    }

    #[test]
    fn test_clamp_after_list_shrinks() {
        let mut p = Pagination::new(2);
        p.last_page(9);
        assert_eq!(p.page(), 4);
        p.clamp(3);
        assert_eq!(p.page(), 1);
        p.clamp(0);
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_range_past_end_is_empty() {
        let mut p = Pagination::new(5);
        p.last_page(20);
        assert_eq!(p.range(3), 3..3);
    }
}
