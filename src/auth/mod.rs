//! Session handling.
//!
//! Login fabricates an identity and issues an opaque token; nothing is
//! verified against any credential source. Sessions live in memory for the
//! process lifetime with no expiry. A display and scoping convenience for
//! the dashboard, explicitly not production authentication.

mod policy;

pub use policy::*;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::errors::AppError;
use crate::models::{Session, UserProfile};

/// Header name accepted as an alternative to the Authorization bearer token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// In-memory session store: token to profile.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `user` and return it with a fresh token.
    pub fn create(&self, user: UserProfile) -> Session {
        let session = Session {
            token: uuid::Uuid::new_v4().to_string(),
            user,
            created_at: Utc::now().to_rfc3339(),
        };

        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(session.token.clone(), session.clone());

        session
    }

    /// Resolve a token to its profile.
    pub fn get(&self, token: &str) -> Option<UserProfile> {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .map(|s| s.user.clone())
    }

    /// Destroy a session. Returns whether the token existed.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token)
            .is_some()
    }
}

/// The authenticated user for the current request, inserted by the session
/// middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

/// Session middleware: resolves the presented token to a profile and makes
/// it available to handlers as a request extension.
pub async fn session_auth_layer(
    sessions: Arc<SessionStore>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());

    match token.and_then(|t| sessions.get(&t)) {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        None => unauthorized_response("Missing or invalid session token"),
    }
}

/// Pull the session token from the Authorization header (as a bearer token)
/// or the x-session-token header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    bearer.or_else(|| {
        headers
            .get(SESSION_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    })
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    AppError::Unauthorized(message.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::Role;

    fn profile(id: &str, role: Role) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            role,
            email: format!("{}@hostel.edu", id),
            registered_number: None,
            block: None,
            room_number: None,
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let store = SessionStore::new();

        let session = store.create(profile("stu1", Role::Student));
        assert_eq!(store.get(&session.token).unwrap().id, "stu1");

        assert!(store.remove(&session.token));
        assert!(store.get(&session.token).is_none());
        assert!(!store.remove(&session.token));
    }

    #[test]
    fn test_tokens_are_unique_per_login() {
        let store = SessionStore::new();
        let a = store.create(profile("stu1", Role::Student));
        let b = store.create(profile("stu1", Role::Student));
        assert_ne!(a.token, b.token);
        // Both sessions resolve independently.
        assert!(store.get(&a.token).is_some());
        assert!(store.get(&b.token).is_some());
    }
}
