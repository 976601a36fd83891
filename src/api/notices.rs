//! Notice board API endpoints.
//!
//! Everyone reads the board; only wardens post and pin. The board order is
//! pinned-first, then newest.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::{poll_duration, success, ApiResult, ChangesParams, CollectionPage};
use crate::auth::{require, Capability, CurrentUser};
use crate::errors::AppError;
use crate::live::{LiveQuery, Snapshot};
use crate::models::{Notice, PostNoticeRequest};
use crate::AppState;

fn board_query(state: &AppState) -> LiveQuery<Notice> {
    state.notices.subscribe(|_| true, Notice::board_order)
}

/// Reload the collection from the database and publish a fresh snapshot.
async fn publish_notices(state: &AppState) -> Result<(), AppError> {
    let snapshot = Snapshot {
        revision: state.repo.get_revision_id().await?,
        records: state.repo.list_notices().await?,
    };
    state.notices.publish(snapshot);
    Ok(())
}

/// GET /api/notices - The notice board, pinned notices first.
pub async fn list_notices(State(state): State<AppState>) -> ApiResult<CollectionPage<Notice>> {
    let mut query = board_query(&state);
    success(query.snapshot().into())
}

/// GET /api/notices/changes - Long-poll for a snapshot newer than `after`.
pub async fn notice_changes(
    State(state): State<AppState>,
    Query(params): Query<ChangesParams>,
) -> ApiResult<CollectionPage<Notice>> {
    let mut query = board_query(&state);

    let result =
        tokio::time::timeout(poll_duration(&params), query.next_after(params.after)).await;
    let snapshot = match result {
        Ok(snapshot) => snapshot?,
        Err(_) => query.snapshot(),
    };

    success(snapshot.into())
}

/// POST /api/notices - Post a notice.
pub async fn post_notice(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<PostNoticeRequest>,
) -> ApiResult<Notice> {
    require(&user, Capability::PostNotice)?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    let notice = state.repo.create_notice(&request, &user).await?;
    publish_notices(&state).await?;

    success(notice)
}

/// POST /api/notices/:id/pin - Toggle the pinned flag.
pub async fn toggle_pin(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Notice> {
    require(&user, Capability::PinNotice)?;

    let current = state
        .repo
        .get_notice(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Notice {} not found", id)))?;

    let notice = state.repo.set_notice_pinned(&id, !current.pinned).await?;
    publish_notices(&state).await?;

    success(notice)
}
