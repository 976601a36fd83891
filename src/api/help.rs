//! Peer help API endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;

use super::{success, ApiResult};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::{AskHelpRequest, HelpRequest, HelpStatus};
use crate::store::{keys, next_record_id, patch_record};
use crate::AppState;

/// GET /api/help-requests - List all help requests.
pub async fn list_help_requests(State(state): State<AppState>) -> ApiResult<Vec<HelpRequest>> {
    let requests: Vec<HelpRequest> = state.local.load(keys::HELP_REQUESTS, Vec::new());
    success(requests)
}

/// POST /api/help-requests - Ask for help.
pub async fn create_help_request(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<AskHelpRequest>,
) -> ApiResult<HelpRequest> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let help = HelpRequest {
        id: next_record_id(),
        title: request.title,
        description: request.description,
        category: request.category,
        requester_id: user.id.clone(),
        requester_name: user.id,
        requester_email: user.email,
        requester_phone: request.phone,
        helper_id: None,
        helper_name: None,
        status: HelpStatus::Open,
        created_at: Utc::now().to_rfc3339(),
    };

    let created = help.clone();
    state
        .local
        .modify(keys::HELP_REQUESTS, |mut records: Vec<HelpRequest>| {
            records.push(help);
            (records, ())
        });

    success(created)
}

/// POST /api/help-requests/:id/offer - Offer to help on an open request.
///
/// Moves the request to helping and records the helper. Requesters cannot
/// offer on their own request.
pub async fn offer_help(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<HelpRequest> {
    let updated = state
        .local
        .modify(keys::HELP_REQUESTS, |records: Vec<HelpRequest>| {
            let existing = match records.iter().find(|r| r.id == id) {
                Some(r) => r.clone(),
                None => {
                    let err = AppError::NotFound(format!("Help request {} not found", id));
                    return (records, Err(err));
                }
            };

            if existing.requester_id == user.id {
                let err =
                    AppError::Validation("You cannot offer help on your own request".to_string());
                return (records, Err(err));
            }
            if existing.status != HelpStatus::Open {
                let err = AppError::Validation(format!("Help request {} is not open", id));
                return (records, Err(err));
            }

            let helper = user.id.clone();
            let updated = patch_record(&records, &id, |r| {
                r.status = HelpStatus::Helping;
                r.helper_id = Some(helper.clone());
                r.helper_name = Some(helper.clone());
            });

            let record = updated
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| AppError::Internal("Patched record vanished".to_string()));
            (updated, record)
        })?;

    success(updated)
}

/// POST /api/help-requests/:id/solve - Mark a request solved.
///
/// Only the requester or the recorded helper may solve, and only while the
/// request is being helped.
pub async fn solve_help_request(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<HelpRequest> {
    let updated = state
        .local
        .modify(keys::HELP_REQUESTS, |records: Vec<HelpRequest>| {
            let existing = match records.iter().find(|r| r.id == id) {
                Some(r) => r.clone(),
                None => {
                    let err = AppError::NotFound(format!("Help request {} not found", id));
                    return (records, Err(err));
                }
            };

            let involved = existing.requester_id == user.id
                || existing.helper_id.as_deref() == Some(user.id.as_str());
            if !involved {
                let err = AppError::Validation(
                    "Only the requester or the helper can mark this solved".to_string(),
                );
                return (records, Err(err));
            }
            if existing.status != HelpStatus::Helping {
                let err =
                    AppError::Validation(format!("Help request {} is not being helped", id));
                return (records, Err(err));
            }

            let updated = patch_record(&records, &id, |r| r.status = HelpStatus::Solved);

            let record = updated
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| AppError::Internal("Patched record vanished".to_string()));
            (updated, record)
        })?;

    success(updated)
}
