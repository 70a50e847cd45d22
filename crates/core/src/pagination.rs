//! Page-number pagination: bound normalization and the result envelope.
//!
//! Pagination input is never rejected. Out-of-range values are clamped to
//! the nearest valid bound so a malformed query still yields a sensible page.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when the caller supplies none, or a value below 1.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on page size; larger requests are clamped to this.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination bounds applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    default_page_size: i64,
    max_page_size: i64,
}

impl PaginationConfig {
    /// Build a config, rejecting bounds that cannot produce a valid page.
    pub fn new(default_page_size: i64, max_page_size: i64) -> Result<Self, CoreError> {
        if max_page_size < 1 {
            return Err(CoreError::Validation(format!(
                "max page size must be at least 1, got {max_page_size}"
            )));
        }
        if default_page_size < 1 || default_page_size > max_page_size {
            return Err(CoreError::Validation(format!(
                "default page size must be within [1, {max_page_size}], got {default_page_size}"
            )));
        }
        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }

    pub fn default_page_size(&self) -> i64 {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> i64 {
        self.max_page_size
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Clamping helpers
// ---------------------------------------------------------------------------

/// Clamp a user-provided page number to 1 or above.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size into `[1, max_page_size]`.
///
/// Missing or non-positive sizes fall back to the configured default rather
/// than to 1.
pub fn clamp_page_size(page_size: Option<i64>, config: &PaginationConfig) -> i64 {
    match page_size {
        Some(size) if size >= 1 => size.min(config.max_page_size),
        _ => config.default_page_size,
    }
}

/// Number of pages needed to hold `total_count` items.
///
/// Zero items means zero pages. `page_size` must already be clamped.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 {
        return 0;
    }
    total_count / page_size + i64::from(total_count % page_size != 0)
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A normalized page request. Only obtainable through [`PageRequest::normalize`],
/// so the storage layer never sees unchecked bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
    unread_only: bool,
}

impl PageRequest {
    pub fn normalize(
        page: Option<i64>,
        page_size: Option<i64>,
        unread_only: bool,
        config: &PaginationConfig,
    ) -> Self {
        Self {
            page: clamp_page(page),
            page_size: clamp_page_size(page_size, config),
            unread_only,
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn unread_only(&self) -> bool {
        self.unread_only
    }

    /// Items to skip before this page begins. Saturates instead of overflowing
    /// for absurd page numbers; such pages are simply empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// One page of results plus the metadata needed to render a pager.
///
/// Built once per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    items: Vec<T>,
    total_count: i64,
    page: i64,
    page_size: i64,
    total_pages: i64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, request: &PageRequest) -> Self {
        let total_count = total_count.max(0);
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
            total_pages: total_pages(total_count, request.page_size),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
