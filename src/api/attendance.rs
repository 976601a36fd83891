//! Attendance API endpoints.
//!
//! Marking is idempotent per calendar day: the handler short-circuits when a
//! same-day record already exists for the student, so the store itself never
//! needs to deduplicate.

use std::collections::BTreeMap;

use axum::{extract::State, Extension};
use chrono::Utc;

use super::{success, ApiResult};
use crate::auth::{require, Capability, CurrentUser};
use crate::models::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, Role, StudentAttendance,
};
use crate::store::{keys, next_record_id};
use crate::AppState;

/// POST /api/attendance/mark - Mark the calling student present for today.
pub async fn mark_attendance(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<AttendanceRecord> {
    require(&user, Capability::MarkAttendance)?;

    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();
    let time = now.format("%H:%M:%S").to_string();

    let record = state
        .local
        .modify(keys::ATTENDANCE, |mut records: Vec<AttendanceRecord>| {
            // Already marked today: return the existing record untouched.
            if let Some(existing) = records
                .iter()
                .find(|r| r.student_id == user.id && r.date == today)
            {
                let existing = existing.clone();
                return (records, existing);
            }

            let record = AttendanceRecord {
                id: next_record_id(),
                student_id: user.id.clone(),
                date: today.clone(),
                time,
                status: AttendanceStatus::Present,
            };
            records.push(record.clone());
            (records, record)
        });

    success(record)
}

/// GET /api/attendance - List attendance records visible to the caller.
pub async fn list_attendance(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let records: Vec<AttendanceRecord> = state.local.load(keys::ATTENDANCE, Vec::new());

    let visible = match user.role {
        Role::Student => records
            .into_iter()
            .filter(|r| r.student_id == user.id)
            .collect(),
        _ => records,
    };

    success(visible)
}

/// GET /api/attendance/summary - Monitoring roll-up for the current month.
pub async fn attendance_summary(
    State(state): State<AppState>,
) -> ApiResult<AttendanceSummary> {
    let records: Vec<AttendanceRecord> = state.local.load(keys::ATTENDANCE, Vec::new());

    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();
    let month_prefix = now.format("%Y-%m").to_string();

    let present_today = records
        .iter()
        .filter(|r| r.date == today && r.status == AttendanceStatus::Present)
        .count() as u32;

    let monthly: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.date.starts_with(&month_prefix))
        .collect();
    let monthly_present = monthly
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let monthly_rate = if monthly.is_empty() {
        0
    } else {
        (monthly_present * 100 / monthly.len()) as u32
    };

    // Per-student roll-up, ordered by student id for a stable response.
    let mut by_student: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for record in &monthly {
        let entry = by_student.entry(record.student_id.as_str()).or_default();
        entry.1 += 1;
        if record.status == AttendanceStatus::Present {
            entry.0 += 1;
        }
    }

    let students = by_student
        .into_iter()
        .map(|(student_id, (present_days, total_days))| StudentAttendance {
            student_id: student_id.to_string(),
            present_days,
            total_days,
            percentage: if total_days == 0 {
                0
            } else {
                present_days * 100 / total_days
            },
        })
        .collect();

    success(AttendanceSummary {
        present_today,
        monthly_rate,
        students,
    })
}
