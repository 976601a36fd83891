//! Data models for the Hostel360 dashboard.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod attendance;
mod complaint;
mod help;
mod leave;
mod lostfound;
mod notice;
mod session;
mod task;

pub use attendance::*;
pub use complaint::*;
pub use help::*;
pub use leave::*;
pub use lostfound::*;
pub use notice::*;
pub use session::*;
pub use task::*;

use serde::{Deserialize, Serialize};

/// Priority shared by notices, complaints and tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}
