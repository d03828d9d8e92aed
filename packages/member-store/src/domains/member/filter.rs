//! Composable member filter
//!
//! The repository contract takes an opaque, composable predicate; this is its
//! concrete form. Adapters interpret it: the in-memory store evaluates
//! `matches` directly, the Postgres store renders it to a parameterized WHERE
//! clause. Both interpretations must agree, which the contract tests pin down.

use serde::{Deserialize, Serialize};

use super::models::member::Member;

/// A boolean-valued predicate over `Member` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberFilter {
    /// Matches every record.
    All,
    /// Matches records with the given blocked flag.
    Blocked(bool),
    /// SQL LIKE pattern over `name` (`%` any run, `_` any single char).
    /// A record without a name never matches.
    NameLike(String),
    /// Matches records that have (or lack) a name.
    HasName(bool),
    And(Vec<MemberFilter>),
    Or(Vec<MemberFilter>),
    Not(Box<MemberFilter>),
}

impl MemberFilter {
    pub fn name_like(pattern: impl Into<String>) -> Self {
        MemberFilter::NameLike(pattern.into())
    }

    pub fn and(self, other: MemberFilter) -> Self {
        match self {
            MemberFilter::And(mut parts) => {
                parts.push(other);
                MemberFilter::And(parts)
            }
            first => MemberFilter::And(vec![first, other]),
        }
    }

    pub fn or(self, other: MemberFilter) -> Self {
        match self {
            MemberFilter::Or(mut parts) => {
                parts.push(other);
                MemberFilter::Or(parts)
            }
            first => MemberFilter::Or(vec![first, other]),
        }
    }

    pub fn negate(self) -> Self {
        MemberFilter::Not(Box::new(self))
    }

    /// Evaluate the filter against one record.
    pub fn matches(&self, member: &Member) -> bool {
        match self {
            MemberFilter::All => true,
            MemberFilter::Blocked(blocked) => member.blocked == *blocked,
            MemberFilter::NameLike(pattern) => member
                .name
                .as_deref()
                .is_some_and(|name| like_match(pattern, name)),
            MemberFilter::HasName(has) => member.name.is_some() == *has,
            MemberFilter::And(parts) => parts.iter().all(|p| p.matches(member)),
            MemberFilter::Or(parts) => parts.iter().any(|p| p.matches(member)),
            MemberFilter::Not(inner) => !inner.matches(member),
        }
    }
}

/// SQL LIKE semantics: `%` matches any run of characters (including empty),
/// `_` matches exactly one. Case-sensitive, as in Postgres LIKE.
pub fn like_match(pattern: &str, input: &str) -> bool {
    fn go(pattern: &[char], input: &[char]) -> bool {
        match pattern.first() {
            None => input.is_empty(),
            Some('%') => (0..=input.len()).any(|skip| go(&pattern[1..], &input[skip..])),
            Some('_') => !input.is_empty() && go(&pattern[1..], &input[1..]),
            Some(c) => input.first() == Some(c) && go(&pattern[1..], &input[1..]),
        }
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let input: Vec<char> = input.chars().collect();
    go(&pattern, &input)
}
