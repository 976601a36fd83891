//! Lost & found model matching the frontend LostFoundItem interface.

use serde::{Deserialize, Serialize};

use crate::store::LocalRecord;

/// Whether an item was reported lost by its owner or found by someone else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

/// Lifecycle of a posting. A lost item resolves to `returned`, a found
/// item to `claimed`; both are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Claimed,
    Returned,
}

/// An item in the `hostelLostFoundItems` local collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostFoundItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ItemKind,
    pub location: String,
    pub poster_id: String,
    pub poster_name: String,
    pub poster_email: String,
    pub poster_phone: String,
    pub status: ItemStatus,
    pub created_at: String,
}

impl LostFoundItem {
    /// The terminal status a resolution moves this item to.
    pub fn resolved_status(&self) -> ItemStatus {
        match self.category {
            ItemKind::Lost => ItemStatus::Returned,
            ItemKind::Found => ItemStatus::Claimed,
        }
    }
}

impl LocalRecord for LostFoundItem {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Request body for posting a lost or found item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItemRequest {
    pub title: String,
    pub description: String,
    pub category: ItemKind,
    pub location: String,
    #[serde(default)]
    pub phone: String,
}
