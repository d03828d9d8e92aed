//! Postgres adapter for the member repository
//!
//! Queries are written by hand against table `member` (columns `member_id`,
//! `name`, `blocked`). Filters and sort keys render to SQL fragments with
//! positional binds; nothing is interpolated from caller input.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::common::paging::{Direction, Page, PageRequest, Sort};
use crate::common::range::RangeSpec;
use crate::config::Config;
use crate::domains::member::filter::MemberFilter;
use crate::domains::member::models::member::Member;

use super::repository::{MemberRepository, StoreError};

const SELECT_MEMBER: &str = "SELECT member_id, name, blocked FROM member";

pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// SQL rendering
// ============================================================================

/// A positional bind value accumulated while rendering a filter.
enum BindValue {
    Bool(bool),
    Text(String),
    Int(i64),
}

/// Map a logical sort/filter field to its column.
fn column_for(field: &str) -> Result<&'static str, StoreError> {
    match field {
        "id" => Ok("member_id"),
        "name" => Ok("name"),
        "blocked" => Ok("blocked"),
        other => Err(StoreError::InvalidSort(other.to_string())),
    }
}

/// Render `ORDER BY ...` for a sort, or an empty string when unsorted.
fn render_order_by(sort: &Sort) -> Result<String, StoreError> {
    if sort.is_unsorted() {
        return Ok(String::new());
    }

    let mut keys = Vec::with_capacity(sort.orders().len());
    for order in sort.orders() {
        let direction = match order.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        keys.push(format!("{} {}", column_for(&order.field)?, direction));
    }
    Ok(format!(" ORDER BY {}", keys.join(", ")))
}

/// Render a filter into a WHERE fragment, pushing bind values as it goes.
/// Placeholders are numbered from the current length of `binds`.
fn render_filter(filter: &MemberFilter, sql: &mut String, binds: &mut Vec<BindValue>) {
    match filter {
        MemberFilter::All => sql.push_str("TRUE"),
        MemberFilter::Blocked(blocked) => {
            binds.push(BindValue::Bool(*blocked));
            sql.push_str(&format!("blocked = ${}", binds.len()));
        }
        MemberFilter::NameLike(pattern) => {
            binds.push(BindValue::Text(pattern.clone()));
            sql.push_str(&format!("name LIKE ${}", binds.len()));
        }
        MemberFilter::HasName(true) => sql.push_str("name IS NOT NULL"),
        MemberFilter::HasName(false) => sql.push_str("name IS NULL"),
        MemberFilter::And(parts) => {
            if parts.is_empty() {
                sql.push_str("TRUE");
                return;
            }
            sql.push('(');
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                render_filter(part, sql, binds);
            }
            sql.push(')');
        }
        MemberFilter::Or(parts) => {
            if parts.is_empty() {
                sql.push_str("FALSE");
                return;
            }
            sql.push('(');
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" OR ");
                }
                render_filter(part, sql, binds);
            }
            sql.push(')');
        }
        MemberFilter::Not(inner) => {
            sql.push_str("NOT (");
            render_filter(inner, sql, binds);
            sql.push(')');
        }
    }
}

impl PgMemberRepository {
    /// Execute a rendered filter query with offset/limit applied.
    async fn fetch_filtered(
        &self,
        filter: &MemberFilter,
        sort: &Sort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Member>, StoreError> {
        let mut sql = format!("{SELECT_MEMBER} WHERE ");
        let mut binds = Vec::new();
        render_filter(filter, &mut sql, &mut binds);
        sql.push_str(&render_order_by(sort)?);

        binds.push(BindValue::Int(limit));
        sql.push_str(&format!(" LIMIT ${}", binds.len()));
        binds.push(BindValue::Int(offset));
        sql.push_str(&format!(" OFFSET ${}", binds.len()));

        tracing::debug!(query = %sql, "member filter query");

        let mut query = sqlx::query_as::<_, Member>(&sql);
        for bind in &binds {
            query = match bind {
                BindValue::Bool(b) => query.bind(*b),
                BindValue::Text(t) => query.bind(t.clone()),
                BindValue::Int(n) => query.bind(*n),
            };
        }

        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_id(&self, member_id: &str) -> Result<Option<Member>, StoreError> {
        let member =
            sqlx::query_as::<_, Member>(&format!("{SELECT_MEMBER} WHERE member_id = $1"))
                .bind(member_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(member)
    }

    async fn find_by_blocked(
        &self,
        blocked: bool,
        page: &PageRequest,
    ) -> Result<Page<Member>, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member WHERE blocked = $1")
            .bind(blocked)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "{SELECT_MEMBER} WHERE blocked = $1{} LIMIT $2 OFFSET $3",
            render_order_by(&page.sort)?
        );
        let items = sqlx::query_as::<_, Member>(&sql)
            .bind(blocked)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn find_by_name_like(
        &self,
        pattern: &str,
        page: &PageRequest,
    ) -> Result<Vec<Member>, StoreError> {
        let sql = format!(
            "{SELECT_MEMBER} WHERE name LIKE $1{} LIMIT $2 OFFSET $3",
            render_order_by(&page.sort)?
        );
        let members = sqlx::query_as::<_, Member>(&sql)
            .bind(pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn find_all(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> Result<Vec<Member>, StoreError> {
        self.fetch_filtered(filter, &page.sort, page.limit(), page.offset())
            .await
    }

    async fn get_range(
        &self,
        filter: &MemberFilter,
        range: &RangeSpec,
    ) -> Result<Vec<Member>, StoreError> {
        // RangeSpec carries no validation; out-of-range values surface as
        // database errors here.
        self.fetch_filtered(filter, &range.sort, range.limit, range.start)
            .await
    }

    async fn find_top3_by_name_like(&self, pattern: &str) -> Result<Vec<Member>, StoreError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "{SELECT_MEMBER} WHERE name LIKE $1 ORDER BY name ASC LIMIT 3"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn find_first_by_name_like(
        &self,
        pattern: &str,
    ) -> Result<Option<Member>, StoreError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "{SELECT_MEMBER} WHERE name LIKE $1 ORDER BY name ASC LIMIT 1"
        ))
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn find_first_by_blocked(&self, blocked: bool) -> Result<Member, StoreError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "{SELECT_MEMBER} WHERE blocked = $1 ORDER BY member_id ASC LIMIT 1"
        ))
        .bind(blocked)
        .fetch_optional(&self.pool)
        .await?;
        member.ok_or(StoreError::NotFound)
    }
}
