//! In-memory adapter for the member repository
//!
//! Backs the repository contract with a locked Vec. Used by the contract
//! tests and for local development without a database. Semantics mirror the
//! Postgres adapter: same filter evaluation, same null ordering (nulls last
//! ascending), same logical-field validation for sorts.

use std::cmp::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::common::paging::{Direction, Page, PageRequest, Sort};
use crate::common::range::RangeSpec;
use crate::domains::member::filter::{like_match, MemberFilter};
use crate::domains::member::models::member::Member;

use super::repository::{MemberRepository, StoreError};

#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: RwLock<Vec<Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            members: RwLock::new(members.into_iter().collect()),
        }
    }

    /// Seed one record. Insertion order is the store's unsorted order.
    pub fn insert(&self, member: Member) {
        self.members.write().unwrap().push(member);
    }

    fn snapshot(&self) -> Vec<Member> {
        self.members.read().unwrap().clone()
    }
}

/// Nulls last ascending, as Postgres orders them; a descending key reverses
/// the whole comparison, which puts nulls first.
fn cmp_optional(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_members(members: &mut [Member], sort: &Sort) -> Result<(), StoreError> {
    // Validate every field up front so the comparator itself cannot fail.
    for order in sort.orders() {
        match order.field.as_str() {
            "id" | "name" | "blocked" => {}
            other => return Err(StoreError::InvalidSort(other.to_string())),
        }
    }

    members.sort_by(|a, b| {
        for order in sort.orders() {
            let ordering = match order.field.as_str() {
                "id" => cmp_optional(&a.id, &b.id),
                "name" => cmp_optional(&a.name, &b.name),
                "blocked" => a.blocked.cmp(&b.blocked),
                _ => Ordering::Equal,
            };
            let ordering = match order.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(())
}

/// Offset/limit window over an already-ordered match list. A negative start
/// clamps to 0 and a non-positive limit yields an empty slice, so out-of-range
/// `RangeSpec` values never panic here.
fn window(members: Vec<Member>, start: i64, limit: i64) -> Vec<Member> {
    if limit <= 0 {
        return Vec::new();
    }
    let start = start.max(0) as usize;
    members.into_iter().skip(start).take(limit as usize).collect()
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, member_id: &str) -> Result<Option<Member>, StoreError> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|m| m.id.as_deref() == Some(member_id)))
    }

    async fn find_by_blocked(
        &self,
        blocked: bool,
        page: &PageRequest,
    ) -> Result<Page<Member>, StoreError> {
        let mut matches: Vec<Member> = self
            .snapshot()
            .into_iter()
            .filter(|m| m.blocked == blocked)
            .collect();
        let total = matches.len() as u64;

        sort_members(&mut matches, &page.sort)?;
        let items = window(matches, page.offset(), page.limit());
        Ok(Page::new(items, total, page))
    }

    async fn find_by_name_like(
        &self,
        pattern: &str,
        page: &PageRequest,
    ) -> Result<Vec<Member>, StoreError> {
        let mut matches: Vec<Member> = self
            .snapshot()
            .into_iter()
            .filter(|m| m.name.as_deref().is_some_and(|name| like_match(pattern, name)))
            .collect();

        sort_members(&mut matches, &page.sort)?;
        Ok(window(matches, page.offset(), page.limit()))
    }

    async fn find_all(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> Result<Vec<Member>, StoreError> {
        let mut matches: Vec<Member> = self
            .snapshot()
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect();

        sort_members(&mut matches, &page.sort)?;
        Ok(window(matches, page.offset(), page.limit()))
    }

    async fn get_range(
        &self,
        filter: &MemberFilter,
        range: &RangeSpec,
    ) -> Result<Vec<Member>, StoreError> {
        let mut matches: Vec<Member> = self
            .snapshot()
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect();

        sort_members(&mut matches, &range.sort)?;
        Ok(window(matches, range.start, range.limit))
    }

    async fn find_top3_by_name_like(&self, pattern: &str) -> Result<Vec<Member>, StoreError> {
        let mut matches = self
            .find_by_name_like(pattern, &PageRequest::of(0, u32::MAX))
            .await?;
        sort_members(&mut matches, &Sort::by("name"))?;
        matches.truncate(3);
        Ok(matches)
    }

    async fn find_first_by_name_like(
        &self,
        pattern: &str,
    ) -> Result<Option<Member>, StoreError> {
        let top = self.find_top3_by_name_like(pattern).await?;
        Ok(top.into_iter().next())
    }

    async fn find_first_by_blocked(&self, blocked: bool) -> Result<Member, StoreError> {
        let mut matches: Vec<Member> = self
            .snapshot()
            .into_iter()
            .filter(|m| m.blocked == blocked)
            .collect();
        sort_members(&mut matches, &Sort::by("id"))?;
        matches.into_iter().next().ok_or(StoreError::NotFound)
    }
}
