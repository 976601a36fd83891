//! Leave application model matching the frontend Leave interface.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Lifecycle of a leave application. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

/// A leave application in the `leaves` live collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub id: String,
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub status: LeaveStatus,
    pub applied_date: String,
    pub student_id: String,
    pub student_name: String,
    pub created_at: String,
}

impl Leave {
    /// Ordering for leave views: newest application first, id as the
    /// deterministic tie-break.
    pub fn newest_first(a: &Leave, b: &Leave) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// Request body for applying for leave.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLeaveRequest {
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
}

/// Request body for deciding a pending leave.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideLeaveRequest {
    pub status: LeaveStatus,
}
