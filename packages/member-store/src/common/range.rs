//! Raw offset/limit range descriptor
//!
//! Unlike `PageRequest`, a `RangeSpec` addresses a result window directly by
//! offset instead of page index, which suits batch and export paths that walk
//! deep into a result set without page arithmetic.

use serde::{Deserialize, Serialize};

use super::paging::Sort;

/// "Up to `limit` results starting at offset `start`, ordered by `sort`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub start: i64,
    pub limit: i64,
    pub sort: Sort,
}

impl RangeSpec {
    pub fn new(start: i64, limit: i64, sort: Sort) -> Self {
        RangeSpec { start, limit, sort }
    }

    /// Unsorted range.
    ///
    /// Performs no validation: a negative `start` or non-positive `limit` is
    /// passed through to the backing store as-is. Postgres rejects a negative
    /// LIMIT/OFFSET with a database error; the in-memory adapter clamps.
    pub fn of(start: i64, limit: i64) -> Self {
        RangeSpec {
            start,
            limit,
            sort: Sort::unsorted(),
        }
    }
}
