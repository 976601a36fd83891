//! Task model matching the frontend Task interface.

use serde::{Deserialize, Serialize};

use super::Priority;
use crate::store::LocalRecord;

/// A checklist task in the `hostelTasks` local collection.
///
/// Completion is the one deliberately bidirectional transition: a task can
/// be ticked and unticked, with `completedAt` stamped or cleared to match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub due_date: String,
    pub assigned_by: String,
    pub assigned_to: String,
}

impl LocalRecord for Task {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: String,
}

fn default_category() -> String {
    "maintenance".to_string()
}
