//! REST API module.
//!
//! Contains all API routes and handlers following the dashboard contract.

mod attendance;
mod auth;
mod complaints;
mod help;
mod leaves;
mod lostfound;
mod notices;
mod tasks;

pub use attendance::*;
pub use auth::*;
pub use complaints::*;
pub use help::*;
pub use leaves::*;
pub use lostfound::*;
pub use notices::*;
pub use tasks::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::live::Snapshot;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// A live-collection snapshot on the wire: the revision that produced it
/// plus the full filtered, ordered record set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPage<T: Serialize> {
    pub revision: i64,
    pub records: Vec<T>,
}

impl<T: Serialize> From<Snapshot<T>> for CollectionPage<T> {
    fn from(snapshot: Snapshot<T>) -> Self {
        Self {
            revision: snapshot.revision,
            records: snapshot.records,
        }
    }
}

/// Query parameters for the long-poll `changes` endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesParams {
    /// Return once the collection revision exceeds this value.
    #[serde(default)]
    pub after: i64,
    /// Poll timeout in milliseconds; the current snapshot is returned when
    /// it elapses.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Bound for the long-poll timeout.
const MAX_POLL_MS: u64 = 30_000;
const DEFAULT_POLL_MS: u64 = 25_000;

pub(crate) fn poll_duration(params: &ChangesParams) -> std::time::Duration {
    let ms = params.timeout_ms.unwrap_or(DEFAULT_POLL_MS).min(MAX_POLL_MS);
    std::time::Duration::from_millis(ms)
}
