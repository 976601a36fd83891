//! Attendance models matching the frontend AttendanceRecord interface.

use serde::{Deserialize, Serialize};

use crate::store::LocalRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One attendance mark in the `hostelAttendance` local collection.
///
/// The marking operation writes at most one record per student per
/// calendar day; `date` is `YYYY-MM-DD`, `time` is the wall-clock time
/// of the mark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub time: String,
    pub status: AttendanceStatus,
}

impl LocalRecord for AttendanceRecord {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Per-student monthly roll-up for the monitoring view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub student_id: String,
    pub present_days: u32,
    pub total_days: u32,
    pub percentage: u32,
}

/// Aggregate stats for the monitoring view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present_today: u32,
    pub monthly_rate: u32,
    pub students: Vec<StudentAttendance>,
}
