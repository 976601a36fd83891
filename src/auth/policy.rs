//! Role capability policy.
//!
//! The single home for role checks. These gates mirror the dashboard's
//! role-conditional UI and are advisory, not a security boundary.

use crate::errors::AppError;
use crate::models::{Role, UserProfile};

/// Everything a role can be gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ApplyLeave,
    DecideLeave,
    PostNotice,
    PinNotice,
    ManageTasks,
    UpdateComplaintStatus,
    MarkAttendance,
}

impl Role {
    /// Whether this role holds `capability`.
    pub fn allows(&self, capability: Capability) -> bool {
        use Capability::*;
        match capability {
            ApplyLeave | MarkAttendance => *self == Role::Student,
            DecideLeave | PostNotice | PinNotice | ManageTasks | UpdateComplaintStatus => {
                *self == Role::Warden
            }
        }
    }
}

/// Gate a handler on a capability, yielding a forbidden error otherwise.
pub fn require(user: &UserProfile, capability: Capability) -> Result<(), AppError> {
    if user.role.allows(capability) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role {} cannot perform this action",
            user.role
        )))
    }
}
