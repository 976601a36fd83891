//! Session and identity models matching the frontend auth context.

use serde::{Deserialize, Serialize};

/// Closed set of roles known to the system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Warden,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Warden => "warden",
            Role::Parent => "parent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "warden" => Some(Role::Warden),
            "parent" => Some(Role::Parent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active identity for a session.
///
/// Fabricated at login without any credential verification; a display and
/// scoping convenience, not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub role: Role,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
}

/// A logged-in session: opaque token plus the profile it resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub created_at: String,
}

/// Request body for logging in.
///
/// The password is accepted and ignored; login fabricates the identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub password: String,
    pub role: Role,
}

/// Request body for signing up.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    #[serde(default)]
    pub registered_number: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
}
