/// Paginated list view-state: 1-based page number, fixed page size, and the
/// total reported by the server. Navigation is clamped at the boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_num: u32,
    page_size: u32,
    total: i64,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self { page_num: 1, page_size: page_size.max(1), total: 0 }
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Record the total returned by a list endpoint and clamp the current
    /// page back into range (deleting the last row of the last page can
    /// shrink the page count under us).
    pub fn set_total(&mut self, total: i64) {
        self.total = total.max(0);
        self.page_num = self.page_num.min(self.total_pages());
    }

    /// `ceil(total / page_size)`, never less than 1.
    pub fn total_pages(&self) -> u32 {
        let pages = (self.total as u64).div_ceil(self.page_size as u64);
        (pages.max(1)).min(u32::MAX as u64) as u32
    }

    pub fn has_prev(&self) -> bool {
        self.page_num > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_num < self.total_pages()
    }

    /// Move back one page; no-op at the first page. Returns true if moved.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page_num -= 1;
            true
        } else {
            false
        }
    }

    /// Move forward one page; no-op at the last page. Returns true if moved.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page_num += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page_num = 1;
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_25_rows_10_per_page() {
        let mut pager = Pager::new(10);
        pager.set_total(25);
        assert_eq!(pager.total_pages(), 3);
        assert!(!pager.has_prev(), "prev disabled on page 1");

        assert!(pager.next());
        assert!(pager.next());
        assert_eq!(pager.page_num(), 3);
        assert!(!pager.has_next(), "next disabled on page 3");
        assert!(!pager.next(), "page 4 is unreachable");
        assert_eq!(pager.page_num(), 3);
    }

    #[test]
    fn test_empty_list_is_single_page() {
        let pager = Pager::new(10);
        assert_eq!(pager.total_pages(), 1);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
    }

    #[test]
    fn test_total_shrink_clamps_current_page() {
        let mut pager = Pager::new(10);
        pager.set_total(21);
        pager.next();
        pager.next();
        assert_eq!(pager.page_num(), 3);
        // Last row of page 3 deleted; reload reports 20.
        pager.set_total(20);
        assert_eq!(pager.page_num(), 2);
    }
}
