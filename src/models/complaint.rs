//! Complaint model matching the frontend Complaint interface.

use serde::{Deserialize, Serialize};

use super::Priority;
use crate::store::LocalRecord;

/// Lifecycle of a complaint. Transitions are forward-only; resolved and
/// closed are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Closed => "closed",
        }
    }

    /// Whether a complaint may move from `self` to `next`.
    pub fn can_advance_to(&self, next: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        match (self, next) {
            (Open, InProgress) | (Open, Resolved) | (Open, Closed) => true,
            (InProgress, Resolved) | (InProgress, Closed) => true,
            _ => false,
        }
    }
}

/// A complaint in the `hostelComplaints` local collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub submitted_by: String,
    pub submitted_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
}

impl LocalRecord for Complaint {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Request body for submitting a complaint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub title: String,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
}

fn default_category() -> String {
    "maintenance".to_string()
}

/// Request body for advancing a complaint's status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_forward_only() {
        use ComplaintStatus::*;
        assert!(Open.can_advance_to(InProgress));
        assert!(Open.can_advance_to(Resolved));
        assert!(InProgress.can_advance_to(Resolved));
        assert!(InProgress.can_advance_to(Closed));

        assert!(!Resolved.can_advance_to(Open));
        assert!(!Resolved.can_advance_to(InProgress));
        assert!(!Closed.can_advance_to(Open));
        assert!(!InProgress.can_advance_to(Open));
        assert!(!Open.can_advance_to(Open));
    }
}
