//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value, saturating at `u64::MAX`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata returned alongside list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Number of items per page.
    pub items_per_page: u64,
    /// Current page number (1-based).
    pub current_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PageMeta {
    /// Build metadata for a page request and a total row count.
    pub fn new(request: &PageRequest, total_items: u64) -> Self {
        Self {
            total_items,
            items_per_page: request.page_size,
            current_page: request.page,
            total_pages: total_items.div_ceil(request.page_size.max(1)),
        }
    }
}

/// Paginated result: one page of items plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total_items),
        }
    }

    /// Transform every item, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let req = PageRequest::new(0, 500);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_offset_saturates_for_huge_page() {
        let req = PageRequest::new(u64::MAX, 10);
        assert_eq!(req.offset(), u64::MAX);
        assert_eq!(PageMeta::new(&req, 5).current_page, u64::MAX);
    }

    #[test]
    fn test_meta_total_pages() {
        let req = PageRequest::new(2, 10);
        assert_eq!(PageMeta::new(&req, 0).total_pages, 0);
        assert_eq!(PageMeta::new(&req, 10).total_pages, 1);
        assert_eq!(PageMeta::new(&req, 11).total_pages, 2);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(&PageRequest::default(), 3);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["totalItems"], 3);
        assert_eq!(json["itemsPerPage"], 10);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 1);
    }
}
