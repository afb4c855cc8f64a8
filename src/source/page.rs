//! Page arithmetic for post listings.

/// Posts shown per page when the caller does not say otherwise.
pub const DEFAULT_PER_PAGE: u32 = 5;

/// A request for one page of a listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

impl PageRequest {
    /// Create a page request. Page 0 is treated as page 1, and a page
    /// size of 0 as 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// The first page with the given size.
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of posts before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// The following page.
    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.per_page)
    }

    /// The preceding page, or this one when already on the first.
    pub fn previous(&self) -> Self {
        Self::new(self.page.saturating_sub(1), self.per_page)
    }
}
