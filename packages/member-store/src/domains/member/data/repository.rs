//! Member repository contract
//!
//! Read-only, stateless operations against a snapshot of the backing store.
//! Every method is idempotent; repeating a call with unchanged store state
//! yields an identical result. Failures from the store propagate unchanged -
//! this layer performs no recovery, retry, or translation.

use async_trait::async_trait;
use thiserror::Error;

use crate::common::paging::{Page, PageRequest};
use crate::common::range::RangeSpec;
use crate::domains::member::filter::MemberFilter;
use crate::domains::member::models::member::Member;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation that promises a result found none. Only
    /// `find_first_by_blocked` raises this; its callers guarantee a match
    /// exists, so an empty result is a broken precondition, not a normal
    /// control-flow branch.
    #[error("no matching member")]
    NotFound,

    /// A sort key referenced a field the store cannot map to a column.
    #[error("unknown sort field: {0}")]
    InvalidSort(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-oriented access to the `member` table.
///
/// Three access shapes, kept as distinct methods so each contract stays
/// exact: "page with total count" (for UI pagers), "slice without count"
/// (cheap internal iteration), and "raw offset/limit range" (batch/export
/// paths).
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Look up one member by id. `None` means "no such member", never an
    /// error.
    async fn find_by_id(&self, member_id: &str) -> Result<Option<Member>, StoreError>;

    /// One page of members with the given blocked flag, plus the total count
    /// of matches across all pages.
    async fn find_by_blocked(
        &self,
        blocked: bool,
        page: &PageRequest,
    ) -> Result<Page<Member>, StoreError>;

    /// Members whose name matches a LIKE pattern, one page slice, no total
    /// count.
    async fn find_by_name_like(
        &self,
        pattern: &str,
        page: &PageRequest,
    ) -> Result<Vec<Member>, StoreError>;

    /// Members matching an arbitrary filter, one page slice, no total count.
    async fn find_all(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> Result<Vec<Member>, StoreError>;

    /// Members matching a filter, addressed by raw offset/limit instead of
    /// page arithmetic.
    async fn get_range(
        &self,
        filter: &MemberFilter,
        range: &RangeSpec,
    ) -> Result<Vec<Member>, StoreError>;

    /// Up to 3 members whose name matches the pattern, ordered by name
    /// ascending.
    async fn find_top3_by_name_like(&self, pattern: &str) -> Result<Vec<Member>, StoreError>;

    /// The first member by name ascending whose name matches the pattern.
    async fn find_first_by_name_like(&self, pattern: &str)
        -> Result<Option<Member>, StoreError>;

    /// The first member by id ascending with the given blocked flag.
    ///
    /// Errors with [`StoreError::NotFound`] when no member matches; call this
    /// only when a match is guaranteed.
    async fn find_first_by_blocked(&self, blocked: bool) -> Result<Member, StoreError>;
}
