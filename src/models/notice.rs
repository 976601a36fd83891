//! Notice model matching the frontend Notice interface.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Priority, Role};

/// A notice in the `notices` live collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_role: Role,
    pub created_at: String,
    pub priority: Priority,
    pub category: String,
    pub pinned: bool,
}

impl Notice {
    /// Board ordering: the pinned flag dominates; within equal pinned state,
    /// newer creation timestamp sorts first, id as the deterministic
    /// tie-break.
    pub fn board_order(a: &Notice, b: &Notice) -> Ordering {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// Request body for posting a notice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNoticeRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
}

fn default_category() -> String {
    "general".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: &str, pinned: bool, created_at: &str) -> Notice {
        Notice {
            id: id.to_string(),
            title: String::new(),
            content: String::new(),
            author: "warden_01".to_string(),
            author_role: Role::Warden,
            created_at: created_at.to_string(),
            priority: Priority::Medium,
            category: "general".to_string(),
            pinned,
        }
    }

    #[test]
    fn test_board_order_pinned_dominates() {
        let mut notices = vec![
            notice("a", false, "2024-01-01T00:00:01Z"),
            notice("b", true, "2024-01-01T00:00:00Z"),
            notice("c", true, "2024-01-01T00:00:02Z"),
        ];
        notices.sort_by(Notice::board_order);

        let ids: Vec<&str> = notices.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_board_order_deterministic_tie_break() {
        let a = notice("a", true, "2024-01-01T00:00:00Z");
        let b = notice("b", true, "2024-01-01T00:00:00Z");
        assert_eq!(Notice::board_order(&a, &b), Ordering::Greater);
        assert_eq!(Notice::board_order(&b, &a), Ordering::Less);
    }
}
