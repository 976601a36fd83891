//! Task checklist API endpoints. Warden-only module.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;

use super::{success, ApiResult};
use crate::auth::{require, Capability, CurrentUser};
use crate::errors::AppError;
use crate::models::{CreateTaskRequest, Task};
use crate::store::{default_tasks, keys, next_record_id, patch_record};
use crate::AppState;

/// GET /api/tasks - The warden's checklist.
///
/// A first read against an empty collection seeds the default checklist for
/// the requesting warden.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<Task>> {
    require(&user, Capability::ManageTasks)?;

    let tasks = state
        .local
        .seed_if_empty(keys::TASKS, default_tasks(&user.id));

    success(tasks)
}

/// POST /api/tasks - Add a task to the checklist.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<Task> {
    require(&user, Capability::ManageTasks)?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.due_date.trim().is_empty() {
        return Err(AppError::Validation("Due date is required".to_string()));
    }

    let task = Task {
        id: next_record_id(),
        title: request.title,
        description: request.description,
        category: request.category,
        priority: request.priority,
        completed: false,
        completed_at: None,
        due_date: request.due_date,
        assigned_by: user.id.clone(),
        assigned_to: user.id,
    };

    let created = task.clone();
    state.local.modify(keys::TASKS, |mut records: Vec<Task>| {
        // Newest tasks sit at the top of the checklist.
        records.insert(0, task);
        (records, ())
    });

    success(created)
}

/// POST /api/tasks/:id/toggle - Flip a task's completion state.
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Task> {
    require(&user, Capability::ManageTasks)?;

    let updated = state.local.modify(keys::TASKS, |records: Vec<Task>| {
        if !records.iter().any(|t| t.id == id) {
            let err = AppError::NotFound(format!("Task {} not found", id));
            return (records, Err(err));
        }

        let completed_at = Utc::now().to_rfc3339();
        let updated = patch_record(&records, &id, |t| {
            t.completed = !t.completed;
            t.completed_at = if t.completed {
                Some(completed_at)
            } else {
                None
            };
        });

        let record = updated
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::Internal("Patched record vanished".to_string()));
        (updated, record)
    })?;

    success(updated)
}
