//! Paged request and response types
//!
//! The list endpoint accepts a filter/page descriptor from the query string.
//! [`FilteredPagedRequest`] is the stock descriptor; a resource can substitute
//! its own type by implementing [`PageQuery`], which only requires that the
//! type be default-constructible so the dispatcher can fall back to defaults
//! when the query string is absent.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum page size a caller can request.
pub const MAX_PAGE_SIZE: usize = 100;

/// A pagination/filter descriptor usable by the list dispatcher.
pub trait PageQuery: Default + DeserializeOwned + Send + 'static {
    /// Page number, 1-based.
    fn page(&self) -> usize;

    /// Items per page, already clamped.
    fn page_size(&self) -> usize;
}

/// Stock filter/page request
///
/// # Example
/// ```text
/// GET /api/tasks?page=2&page_size=10
/// GET /api/tasks?filter={"state":"Done"}
/// GET /api/tasks?filter={"priority>":2}&sort=title:desc
/// ```
///
/// Filters are a JSON object: exact match on `"field"`, comparisons via
/// `"field>"`, `"field<"`, `"field>="`, `"field<="`. Sort expressions are
/// `field`, `field:asc` or `field:desc`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilteredPagedRequest {
    pub page: usize,
    pub page_size: usize,
    pub filter: Option<String>,
    pub sort: Option<String>,
}

impl FilteredPagedRequest {
    /// Parse the filter JSON string, ignoring malformed input.
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }
}

impl PageQuery for FilteredPagedRequest {
    fn page(&self) -> usize {
        self.page.max(1)
    }

    fn page_size(&self) -> usize {
        if self.page_size == 0 {
            20
        } else {
            self.page_size.min(MAX_PAGE_SIZE)
        }
    }
}

/// A page of results plus its metadata.
#[derive(Debug, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, page: usize, page_size: usize, total: usize) -> Self {
        Self {
            items,
            meta: PageMeta::new(page, page_size, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let start = (page - 1) * page_size;

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: start + page_size < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = FilteredPagedRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 20);
        assert!(request.filter_value().is_none());
    }

    #[test]
    fn test_page_size_clamped() {
        let request = FilteredPagedRequest {
            page_size: 1000,
            ..Default::default()
        };
        assert_eq!(request.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_zero_page_normalized() {
        let request = FilteredPagedRequest {
            page: 0,
            ..Default::default()
        };
        assert_eq!(request.page(), 1);
    }

    #[test]
    fn test_filter_value_parses_json() {
        let request = FilteredPagedRequest {
            filter: Some(r#"{"state":"Done"}"#.to_string()),
            ..Default::default()
        };
        let value = request.filter_value().expect("valid json");
        assert_eq!(value["state"], "Done");
    }

    #[test]
    fn test_malformed_filter_ignored() {
        let request = FilteredPagedRequest {
            filter: Some("{not json".to_string()),
            ..Default::default()
        };
        assert!(request.filter_value().is_none());
    }

    #[test]
    fn test_page_meta() {
        let meta = PageMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_page_meta_last_page() {
        let meta = PageMeta::new(8, 20, 145);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_page_meta_empty() {
        let meta = PageMeta::new(1, 20, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
