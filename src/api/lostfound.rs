//! Lost & found API endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{success, ApiResult};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::{ItemKind, ItemStatus, LostFoundItem, ReportItemRequest};
use crate::store::{keys, next_record_id, patch_record};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemFilter {
    /// Restrict the listing to lost or found postings.
    #[serde(default)]
    pub category: Option<ItemKind>,
}

/// GET /api/lost-found - List postings, optionally filtered by kind.
pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> ApiResult<Vec<LostFoundItem>> {
    let items: Vec<LostFoundItem> = state.local.load(keys::LOST_FOUND_ITEMS, Vec::new());

    let visible = match filter.category {
        Some(kind) => items.into_iter().filter(|i| i.category == kind).collect(),
        None => items,
    };

    success(visible)
}

/// POST /api/lost-found - Post a lost or found item.
pub async fn report_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<ReportItemRequest>,
) -> ApiResult<LostFoundItem> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }
    if request.location.trim().is_empty() {
        return Err(AppError::Validation("Location is required".to_string()));
    }

    let item = LostFoundItem {
        id: next_record_id(),
        title: request.title,
        description: request.description,
        category: request.category,
        location: request.location,
        poster_id: user.id.clone(),
        poster_name: user.id,
        poster_email: user.email,
        poster_phone: request.phone,
        status: ItemStatus::Active,
        created_at: Utc::now().to_rfc3339(),
    };

    let created = item.clone();
    state
        .local
        .modify(keys::LOST_FOUND_ITEMS, |mut records: Vec<LostFoundItem>| {
            records.push(item);
            (records, ())
        });

    success(created)
}

/// POST /api/lost-found/:id/resolve - Close out an active posting.
///
/// A lost item becomes returned, a found item becomes claimed. The poster
/// cannot resolve their own posting; someone else has to come forward.
pub async fn resolve_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<LostFoundItem> {
    let updated = state
        .local
        .modify(keys::LOST_FOUND_ITEMS, |records: Vec<LostFoundItem>| {
            let existing = match records.iter().find(|i| i.id == id) {
                Some(i) => i.clone(),
                None => {
                    let err = AppError::NotFound(format!("Item {} not found", id));
                    return (records, Err(err));
                }
            };

            if existing.poster_id == user.id {
                let err = AppError::Validation(
                    "You cannot resolve your own posting".to_string(),
                );
                return (records, Err(err));
            }
            if existing.status != ItemStatus::Active {
                let err = AppError::Validation(format!("Item {} is no longer active", id));
                return (records, Err(err));
            }

            let resolved = existing.resolved_status();
            let updated = patch_record(&records, &id, |i| i.status = resolved);

            let record = updated
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or_else(|| AppError::Internal("Patched record vanished".to_string()));
            (updated, record)
        })?;

    success(updated)
}
