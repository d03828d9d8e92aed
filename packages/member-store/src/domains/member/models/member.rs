use serde::{Deserialize, Serialize};

/// Member record - SQL read model
///
/// Maps to table `member` with columns `member_id`, `name`, `blocked`. The
/// column mapping is load-bearing: existing stores depend on these exact
/// names.
///
/// `id` is absent for a record that has not been persisted yet; when present
/// it is the store's primary key and unique across the table.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[sqlx(rename = "member_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub blocked: bool,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, blocked: bool) -> Self {
        Member {
            id: Some(id.into()),
            name: Some(name.into()),
            blocked,
        }
    }

    /// Entity identity: two records refer to the same stored member when both
    /// carry the same non-null id. Field-wise equality is `PartialEq`.
    pub fn same_entity_as(&self, other: &Member) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_defaults_false_in_constructor_free_form() {
        let member = Member {
            id: None,
            name: None,
            blocked: false,
        };
        assert!(member.id.is_none());
        assert!(!member.blocked);
    }

    #[test]
    fn test_same_entity_requires_matching_non_null_ids() {
        let a = Member::new("m-1", "Alice", false);
        let b = Member::new("m-1", "Alice Renamed", true);
        let c = Member::new("m-2", "Alice", false);
        let unsaved = Member {
            id: None,
            name: Some("Alice".to_string()),
            blocked: false,
        };

        assert!(a.same_entity_as(&b));
        assert!(!a.same_entity_as(&c));
        assert!(!unsaved.same_entity_as(&unsaved.clone()));
    }
}
