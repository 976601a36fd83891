//! Leave management API endpoints.
//!
//! Students see their own applications; wardens and parents see all. Reads
//! go through a live query so the list and changes endpoints share the same
//! filtered, ordered view of the collection.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::{poll_duration, success, ApiResult, ChangesParams, CollectionPage};
use crate::auth::{require, Capability, CurrentUser};
use crate::errors::AppError;
use crate::live::{LiveQuery, Snapshot};
use crate::models::{ApplyLeaveRequest, DecideLeaveRequest, Leave, Role, UserProfile};
use crate::AppState;

/// Subscribe with the caller's role scope: students observe only their own
/// applications.
fn scoped_query(state: &AppState, user: &UserProfile) -> LiveQuery<Leave> {
    let scope = match user.role {
        Role::Student => Some(user.id.clone()),
        _ => None,
    };
    state.leaves.subscribe(
        move |leave: &Leave| match &scope {
            Some(student_id) => &leave.student_id == student_id,
            None => true,
        },
        Leave::newest_first,
    )
}

/// Reload the collection from the database and publish a fresh snapshot.
async fn publish_leaves(state: &AppState) -> Result<(), AppError> {
    let snapshot = Snapshot {
        revision: state.repo.get_revision_id().await?,
        records: state.repo.list_leaves().await?,
    };
    state.leaves.publish(snapshot);
    Ok(())
}

/// GET /api/leaves - List leave applications visible to the caller.
pub async fn list_leaves(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<CollectionPage<Leave>> {
    let mut query = scoped_query(&state, &user);
    success(query.snapshot().into())
}

/// GET /api/leaves/changes - Long-poll for a snapshot newer than `after`.
pub async fn leave_changes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ChangesParams>,
) -> ApiResult<CollectionPage<Leave>> {
    let mut query = scoped_query(&state, &user);

    let result =
        tokio::time::timeout(poll_duration(&params), query.next_after(params.after)).await;
    let snapshot = match result {
        Ok(snapshot) => snapshot?,
        // Poll window elapsed; hand back the current view.
        Err(_) => query.snapshot(),
    };

    success(snapshot.into())
}

/// POST /api/leaves - Apply for leave.
pub async fn apply_leave(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<ApplyLeaveRequest>,
) -> ApiResult<Leave> {
    require(&user, Capability::ApplyLeave)?;

    if request.reason.trim().is_empty() {
        return Err(AppError::Validation("Reason is required".to_string()));
    }
    if request.start_date.trim().is_empty() || request.end_date.trim().is_empty() {
        return Err(AppError::Validation(
            "Start and end dates are required".to_string(),
        ));
    }

    let leave = state.repo.create_leave(&request, &user).await?;
    publish_leaves(&state).await?;

    success(leave)
}

/// POST /api/leaves/:id/decision - Approve or reject a pending leave.
pub async fn decide_leave(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(request): Json<DecideLeaveRequest>,
) -> ApiResult<Leave> {
    require(&user, Capability::DecideLeave)?;

    let leave = state.repo.decide_leave(&id, request.status).await?;
    publish_leaves(&state).await?;

    success(leave)
}
