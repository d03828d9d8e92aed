//! Offset-pagination value types
//!
//! `PageRequest` describes "page N of size M, ordered by S"; `Page<T>` carries
//! a result slice plus the total match count for UI pagers. Operations that
//! only stream a slice return a plain `Vec` and skip the count query.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sort
// ============================================================================

/// Direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// One (field, direction) sort key.
///
/// Fields are logical names (`"id"`, `"name"`, `"blocked"`); adapters map them
/// to storage columns and reject anything they cannot map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

/// An ordering specification: a sequence of sort keys, applied left to right.
///
/// The empty sequence means "unsorted" - the store may return results in
/// implementation-defined order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// The store decides the order.
    pub fn unsorted() -> Self {
        Sort { orders: Vec::new() }
    }

    /// Sort ascending by a single field.
    pub fn by(field: impl Into<String>) -> Self {
        Sort {
            orders: vec![SortOrder {
                field: field.into(),
                direction: Direction::Asc,
            }],
        }
    }

    /// Sort descending by a single field.
    pub fn by_desc(field: impl Into<String>) -> Self {
        Sort {
            orders: vec![SortOrder {
                field: field.into(),
                direction: Direction::Desc,
            }],
        }
    }

    /// Append an ascending sort key.
    pub fn and(mut self, field: impl Into<String>) -> Self {
        self.orders.push(SortOrder {
            field: field.into(),
            direction: Direction::Asc,
        });
        self
    }

    /// Append a descending sort key.
    pub fn and_desc(mut self, field: impl Into<String>) -> Self {
        self.orders.push(SortOrder {
            field: field.into(),
            direction: Direction::Desc,
        });
        self
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }
}

// ============================================================================
// PageRequest
// ============================================================================

/// A classic offset-pagination descriptor: zero-based page index, page size,
/// and an ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    /// Page `page` of `size` items, unsorted.
    pub fn of(page: u32, size: u32) -> Self {
        PageRequest {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    /// Replace the ordering.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// SQL OFFSET value for this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// SQL LIMIT value for this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

// ============================================================================
// Page
// ============================================================================

/// A bounded result slice plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of records matching the query, across all pages.
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: &PageRequest) -> Self {
        Page {
            items,
            total_count,
            page: request.page,
            size: request.size,
        }
    }

    /// Number of pages needed to cover `total_count` at this page size.
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.size))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
