//! Deterministic demo content for first-run local collections.
//!
//! Seeds apply only when a collection is empty; existing data is never
//! overwritten. The live collections (`leaves`, `notices`) start empty and
//! are deliberately not seeded.

use crate::models::{HelpRequest, HelpStatus, ItemKind, ItemStatus, LostFoundItem, Priority, Task};

/// Starter lost & found postings shown to new installations.
pub fn default_lost_found_items() -> Vec<LostFoundItem> {
    vec![
        LostFoundItem {
            id: "lf1".to_string(),
            title: "Lost: Black Wallet".to_string(),
            description: "Black leather wallet with college ID and some cash. Lost near mess hall."
                .to_string(),
            category: ItemKind::Lost,
            location: "Mess Hall".to_string(),
            poster_id: "student_03".to_string(),
            poster_name: "student_03".to_string(),
            poster_email: "student_03@hostel.edu".to_string(),
            poster_phone: "99999-33333".to_string(),
            status: ItemStatus::Active,
            created_at: "2024-01-09T18:00:00Z".to_string(),
        },
        LostFoundItem {
            id: "lf2".to_string(),
            title: "Found: USB Drive 32GB".to_string(),
            description:
                "Sandisk 32GB pendrive found in library computer area. Describe contents to claim."
                    .to_string(),
            category: ItemKind::Found,
            location: "Library".to_string(),
            poster_id: "student_04".to_string(),
            poster_name: "student_04".to_string(),
            poster_email: "student_04@hostel.edu".to_string(),
            poster_phone: "99999-44444".to_string(),
            status: ItemStatus::Active,
            created_at: "2024-01-08T22:00:00Z".to_string(),
        },
    ]
}

/// Starter peer-help requests shown to new installations.
pub fn default_help_requests() -> Vec<HelpRequest> {
    vec![
        HelpRequest {
            id: "h1".to_string(),
            title: "Need help with Math Assignment".to_string(),
            description: "Struggling with calculus problems due tomorrow. Anyone good at integrals?"
                .to_string(),
            category: "academic".to_string(),
            requester_id: "student_01".to_string(),
            requester_name: "student_01".to_string(),
            requester_email: "student_01@hostel.edu".to_string(),
            requester_phone: "99999-11111".to_string(),
            helper_id: None,
            helper_name: None,
            status: HelpStatus::Open,
            created_at: "2024-01-10T07:00:00Z".to_string(),
        },
        HelpRequest {
            id: "h2".to_string(),
            title: "Looking for a laptop charger (Type-C)".to_string(),
            description: "Forgot my charger at home. Need to borrow for a few hours this evening."
                .to_string(),
            category: "personal".to_string(),
            requester_id: "student_02".to_string(),
            requester_name: "student_02".to_string(),
            requester_email: "student_02@hostel.edu".to_string(),
            requester_phone: "99999-22222".to_string(),
            helper_id: None,
            helper_name: None,
            status: HelpStatus::Open,
            created_at: "2024-01-10T00:00:00Z".to_string(),
        },
    ]
}

/// Starter checklist for a warden's first visit. `assigned_to` is the
/// requesting warden; everything else is fixed.
pub fn default_tasks(assigned_to: &str) -> Vec<Task> {
    vec![
        Task {
            id: "t1".to_string(),
            title: "Check Water Supply".to_string(),
            description: "Ensure all blocks have adequate water supply".to_string(),
            category: "maintenance".to_string(),
            priority: Priority::High,
            completed: false,
            completed_at: None,
            due_date: "2024-01-10".to_string(),
            assigned_by: "Admin".to_string(),
            assigned_to: assigned_to.to_string(),
        },
        Task {
            id: "t2".to_string(),
            title: "Inspect Common Areas".to_string(),
            description: "Check cleanliness of common areas and report issues".to_string(),
            category: "inspection".to_string(),
            priority: Priority::Medium,
            completed: true,
            completed_at: Some("2024-01-09T09:30:00Z".to_string()),
            due_date: "2024-01-09".to_string(),
            assigned_by: "Admin".to_string(),
            assigned_to: assigned_to.to_string(),
        },
    ]
}
