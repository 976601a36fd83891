//! Peer help model matching the frontend HelpRequest interface.

use serde::{Deserialize, Serialize};

use crate::store::LocalRecord;

/// Lifecycle of a help request: open until someone offers to help, solved
/// when the requester or the helper marks it done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HelpStatus {
    Open,
    Helping,
    Solved,
}

/// A help request in the `hostelHelpRequests` local collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub requester_id: String,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_name: Option<String>,
    pub status: HelpStatus,
    pub created_at: String,
}

impl LocalRecord for HelpRequest {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Request body for asking for help.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskHelpRequest {
    pub title: String,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub phone: String,
}

fn default_category() -> String {
    "academic".to_string()
}
