//! Offset/limit paging for question listings.

/// A 1-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Missing page numbers (and 0) mean the first page; a size of 0 is
    /// bumped to 1.
    pub fn new(number: Option<u32>, size: u32) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.number.saturating_sub(1)).saturating_mul(i64::from(self.size))
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Page {
        fn len_of(&self, total: i64) -> i64 {
            (total - self.offset()).clamp(0, self.limit())
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Page::new(Some(1), 10).offset(), 0);
        assert_eq!(Page::new(Some(2), 10).offset(), 10);
        assert_eq!(Page::new(Some(3), 6).offset(), 12);
    }

    #[test]
    fn defaults_to_first_page() {
        assert_eq!(Page::new(None, 10).number, 1);
        assert_eq!(Page::new(Some(0), 10).number, 1);
        assert_eq!(Page::new(Some(1), 0).size, 1);
    }

    #[test]
    fn page_lengths() {
        // 23 questions, 10 per page
        assert_eq!(Page::new(Some(1), 10).len_of(23), 10);
        assert_eq!(Page::new(Some(3), 10).len_of(23), 3);
        assert_eq!(Page::new(Some(4), 10).len_of(23), 0);
        assert_eq!(Page::new(Some(1), 10).len_of(0), 0);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = Page::new(Some(u32::MAX), u32::MAX);
        assert!(page.offset() > 0);
        assert_eq!(page.len_of(100), 0);
    }
}
