//! Complaint tracker API endpoints.
//!
//! Any role can submit; students see their own complaints, wardens and
//! parents see all; wardens advance statuses. Transitions are forward-only.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;

use super::{success, ApiResult};
use crate::auth::{require, Capability, CurrentUser};
use crate::errors::AppError;
use crate::models::{
    Complaint, ComplaintStatus, CreateComplaintRequest, Role, UpdateComplaintStatusRequest,
};
use crate::store::{keys, next_record_id, patch_record};
use crate::AppState;

/// GET /api/complaints - List complaints visible to the caller.
pub async fn list_complaints(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<Complaint>> {
    let complaints: Vec<Complaint> = state.local.load(keys::COMPLAINTS, Vec::new());

    let visible = match user.role {
        Role::Student => complaints
            .into_iter()
            .filter(|c| c.submitted_by == user.id)
            .collect(),
        _ => complaints,
    };

    success(visible)
}

/// POST /api/complaints - Submit a complaint.
pub async fn create_complaint(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateComplaintRequest>,
) -> ApiResult<Complaint> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let complaint = Complaint {
        id: next_record_id(),
        title: request.title,
        description: request.description,
        category: request.category,
        priority: request.priority,
        status: ComplaintStatus::Open,
        submitted_by: user.id,
        submitted_at: Utc::now().to_rfc3339(),
        resolved_at: None,
    };

    let created = complaint.clone();
    state
        .local
        .modify(keys::COMPLAINTS, |mut records: Vec<Complaint>| {
            records.push(complaint);
            (records, ())
        });

    success(created)
}

/// POST /api/complaints/:id/status - Advance a complaint's status.
pub async fn update_complaint_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateComplaintStatusRequest>,
) -> ApiResult<Complaint> {
    require(&user, Capability::UpdateComplaintStatus)?;

    let updated = state
        .local
        .modify(keys::COMPLAINTS, |records: Vec<Complaint>| {
            let existing = match records.iter().find(|c| c.id == id) {
                Some(c) => c.clone(),
                None => {
                    let err = AppError::NotFound(format!("Complaint {} not found", id));
                    return (records, Err(err));
                }
            };

            if !existing.status.can_advance_to(request.status) {
                let err = AppError::Validation(format!(
                    "Cannot move a {} complaint to {}",
                    existing.status.as_str(),
                    request.status.as_str()
                ));
                return (records, Err(err));
            }

            let resolved_at = Utc::now().to_rfc3339();
            let updated = patch_record(&records, &id, |c| {
                c.status = request.status;
                if request.status == ComplaintStatus::Resolved {
                    c.resolved_at = Some(resolved_at);
                }
            });

            let record = updated
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| AppError::Internal("Patched record vanished".to_string()));
            (updated, record)
        })?;

    success(updated)
}
