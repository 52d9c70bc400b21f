use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters shared by list endpoints. Pages are 1-indexed; missing or
/// out-of-range values fall back to defaults, sizes are capped.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl PageQuery {
    pub fn normalize(&self) -> Page {
        let page = match self.page {
            Some(p) if p > 0 => p,
            _ => 1,
        };
        let page_size = match self.page_size {
            Some(s) if s > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
            Some(s) if s > 0 => s,
            _ => DEFAULT_PAGE_SIZE,
        };
        Page { page, page_size }
    }
}

impl Page {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub list: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> PageResponse<T> {
    pub fn new(list: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            list,
            total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, page_size: Option<i64>) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn defaults_apply_when_unset() {
        let p = query(None, None).normalize();
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_and_negative_pages_fall_back_to_first() {
        assert_eq!(query(Some(0), None).normalize().page, 1);
        assert_eq!(query(Some(-3), None).normalize().page, 1);
    }

    #[test]
    fn oversized_page_size_is_capped() {
        assert_eq!(query(None, Some(101)).normalize().page_size, MAX_PAGE_SIZE);
        assert_eq!(query(None, Some(10_000)).normalize().page_size, MAX_PAGE_SIZE);
        assert_eq!(query(None, Some(100)).normalize().page_size, 100);
    }

    #[test]
    fn offset_is_one_indexed() {
        let p = query(Some(1), Some(10)).normalize();
        assert_eq!(p.offset(), 0);
        let p = query(Some(3), Some(25)).normalize();
        assert_eq!(p.offset(), 50);
        assert_eq!(p.limit(), 25);
    }
}
