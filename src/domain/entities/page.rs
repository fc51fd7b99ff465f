//! Paginated response envelope.

use serde::{Deserialize, Serialize};

/// Pagination metadata sent under the `info` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of records across all pages.
    pub count: u32,
    /// Total number of pages.
    pub pages: u32,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub prev: Option<String>,
}

/// One page of results. Only the first page is ever requested; `next` is
/// exposed for callers but never followed by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    info: PageInfo,
    results: Vec<T>,
}

impl<T> Page<T> {
    /// Creates a page from metadata and results.
    #[must_use]
    pub const fn new(info: PageInfo, results: Vec<T>) -> Self {
        Self { info, results }
    }

    /// Returns the pagination metadata.
    #[must_use]
    pub const fn info(&self) -> &PageInfo {
        &self.info
    }

    /// Returns the total record count.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.info.count
    }

    /// Returns the total page count.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.info.pages
    }

    /// Returns the next page URL.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.info.next.as_deref()
    }

    /// Returns the previous page URL.
    #[must_use]
    pub fn prev(&self) -> Option<&str> {
        self.info.prev.as_deref()
    }

    /// Returns the results on this page.
    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Consumes the page, returning its results.
    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}
