//! Offset pagination arithmetic.
//!
//! `next()` is not clamped: callers check `can_go_next()` before advancing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(skip: u32, limit: u32, total: u64) -> Self {
        Self { skip, limit, total }
    }

    pub fn can_go_previous(&self) -> bool {
        self.skip > 0
    }

    pub fn can_go_next(&self) -> bool {
        u64::from(self.skip) + u64::from(self.limit) < self.total
    }

    pub fn previous(&self) -> u32 {
        self.skip.saturating_sub(self.limit)
    }

    pub fn next(&self) -> u32 {
        self.skip.saturating_add(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_cannot_go_back() {
        let p = Pagination::new(0, 10, 30);
        assert!(!p.can_go_previous());
        assert!(p.can_go_next());
        assert_eq!(p.previous(), 0);
        assert_eq!(p.next(), 10);
    }

    #[test]
    fn last_page_cannot_go_forward() {
        assert!(!Pagination::new(20, 10, 30).can_go_next());
        assert!(!Pagination::new(25, 10, 30).can_go_next());
        assert!(Pagination::new(19, 10, 30).can_go_next());
    }

    #[test]
    fn previous_never_goes_negative() {
        assert_eq!(Pagination::new(5, 10, 30).previous(), 0);
        assert_eq!(Pagination::new(25, 10, 30).previous(), 15);
    }

    #[test]
    fn next_is_not_clamped_past_the_end() {
        let p = Pagination::new(20, 10, 25);
        assert!(!p.can_go_next());
        assert_eq!(p.next(), 30);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let p = Pagination::new(0, 10, 0);
        assert!(!p.can_go_previous());
        assert!(!p.can_go_next());
    }
}
