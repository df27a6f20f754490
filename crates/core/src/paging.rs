//! Pagination primitives shared by the list operations.

use serde::{Deserialize, Serialize};

/// Maximum page size accepted from callers; larger requests are clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Creates a request with the page index and size clamped to sane bounds.
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.max(0),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results together with the total row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Maps the page content, keeping the paging metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
