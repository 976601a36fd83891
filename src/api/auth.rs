//! Auth API endpoints.
//!
//! Login and signup fabricate the identity without touching any credential
//! source; see the session module for why this is deliberate.

use axum::{
    extract::State,
    http::HeaderMap,
    Extension, Json,
};

use super::{success, ApiResult};
use crate::auth::{session_token, CurrentUser};
use crate::errors::AppError;
use crate::models::{LoginRequest, Role, Session, SignupRequest, UserProfile};
use crate::AppState;

/// POST /api/auth/login - Start a session for the submitted identity.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Session> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Validation("User ID is required".to_string()));
    }

    let user = UserProfile {
        id: request.user_id.clone(),
        role: request.role,
        email: format!("{}@hostel.edu", request.user_id),
        registered_number: None,
        block: None,
        room_number: None,
    };

    let session = state.sessions.create(user);
    tracing::info!("Session started for {} ({})", session.user.id, session.user.role);
    success(session)
}

/// POST /api/auth/signup - Register an identity and start a session.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Session> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Validation("User ID is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if request.password != request.confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    let user = UserProfile {
        id: request.user_id.clone(),
        role: request.role,
        email: request.email.clone(),
        registered_number: match request.role {
            Role::Student => request.registered_number.clone(),
            _ => None,
        },
        block: match request.role {
            Role::Student | Role::Parent => request.block.clone(),
            Role::Warden => None,
        },
        room_number: match request.role {
            Role::Student => request.room_number.clone(),
            _ => None,
        },
    };

    let session = state.sessions.create(user);
    tracing::info!("Signed up {} as {}", session.user.id, session.user.role);
    success(session)
}

/// GET /api/auth/me - Profile for the presented session token.
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResult<UserProfile> {
    success(user)
}

/// POST /api/auth/logout - Destroy the presented session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<()> {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token);
    }
    success(())
}
