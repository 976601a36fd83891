//! Database repository for the live collections.
//!
//! Every write bumps the revision counter so the in-process live views can
//! stamp and publish a fresh snapshot.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    ApplyLeaveRequest, Leave, LeaveStatus, Notice, PostNoticeRequest, Priority, Role, UserProfile,
};

/// Database repository for all live-collection operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    // ==================== LEAVE OPERATIONS ====================

    /// List all leave applications.
    pub async fn list_leaves(&self) -> Result<Vec<Leave>, AppError> {
        let rows = sqlx::query(
            "SELECT id, reason, start_date, end_date, status, applied_date, student_id, student_name, created_at FROM leaves ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(leave_from_row).collect())
    }

    /// Get a leave application by ID.
    pub async fn get_leave(&self, id: &str) -> Result<Option<Leave>, AppError> {
        let row = sqlx::query(
            "SELECT id, reason, start_date, end_date, status, applied_date, student_id, student_name, created_at FROM leaves WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(leave_from_row))
    }

    /// Create a new leave application for `student`. The id and creation
    /// timestamp are server-assigned; status starts pending.
    pub async fn create_leave(
        &self,
        request: &ApplyLeaveRequest,
        student: &UserProfile,
    ) -> Result<Leave, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        let created_at = now.to_rfc3339();
        let applied_date = now.format("%Y-%m-%d").to_string();

        sqlx::query(
            "INSERT INTO leaves (id, reason, start_date, end_date, status, applied_date, student_id, student_name, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.reason)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .bind(LeaveStatus::Pending.as_str())
        .bind(&applied_date)
        .bind(&student.id)
        .bind(&student.id)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Leave {
            id,
            reason: request.reason.clone(),
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            status: LeaveStatus::Pending,
            applied_date,
            student_id: student.id.clone(),
            student_name: student.id.clone(),
            created_at,
        })
    }

    /// Decide a pending leave application. Decisions are one-directional:
    /// only a pending leave can move, and only to approved or rejected.
    pub async fn decide_leave(&self, id: &str, status: LeaveStatus) -> Result<Leave, AppError> {
        if status == LeaveStatus::Pending {
            return Err(AppError::Validation(
                "A leave cannot be moved back to pending".to_string(),
            ));
        }

        let existing = self
            .get_leave(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Leave {} not found", id)))?;

        // Conditional UPDATE so a concurrent decision cannot flip an
        // already-decided leave.
        let result = sqlx::query("UPDATE leaves SET status = ? WHERE id = ? AND status = ?")
            .bind(status.as_str())
            .bind(id)
            .bind(LeaveStatus::Pending.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Validation(format!(
                "Leave {} is already {}",
                id,
                existing.status.as_str()
            )));
        }

        self.increment_revision().await?;

        Ok(Leave { status, ..existing })
    }

    // ==================== NOTICE OPERATIONS ====================

    /// List all notices.
    pub async fn list_notices(&self) -> Result<Vec<Notice>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, content, author, author_role, category, priority, pinned, created_at FROM notices ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(notice_from_row).collect())
    }

    /// Get a notice by ID.
    pub async fn get_notice(&self, id: &str) -> Result<Option<Notice>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, content, author, author_role, category, priority, pinned, created_at FROM notices WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(notice_from_row))
    }

    /// Create a new notice authored by `author`. Notices start unpinned.
    pub async fn create_notice(
        &self,
        request: &PostNoticeRequest,
        author: &UserProfile,
    ) -> Result<Notice, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO notices (id, title, content, author, author_role, category, priority, pinned, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&author.id)
        .bind(author.role.as_str())
        .bind(&request.category)
        .bind(request.priority.as_str())
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Notice {
            id,
            title: request.title.clone(),
            content: request.content.clone(),
            author: author.id.clone(),
            author_role: author.role,
            created_at,
            priority: request.priority,
            category: request.category.clone(),
            pinned: false,
        })
    }

    /// Set the pinned flag on a notice.
    pub async fn set_notice_pinned(&self, id: &str, pinned: bool) -> Result<Notice, AppError> {
        let existing = self
            .get_notice(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notice {} not found", id)))?;

        sqlx::query("UPDATE notices SET pinned = ? WHERE id = ?")
            .bind(pinned as i32)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.increment_revision().await?;

        Ok(Notice { pinned, ..existing })
    }
}

/// Map a database row to a Leave.
fn leave_from_row(row: &SqliteRow) -> Leave {
    let status: String = row.get("status");

    Leave {
        id: row.get("id"),
        reason: row.get("reason"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        status: LeaveStatus::from_str(&status).unwrap_or(LeaveStatus::Pending),
        applied_date: row.get("applied_date"),
        student_id: row.get("student_id"),
        student_name: row.get("student_name"),
        created_at: row.get("created_at"),
    }
}

/// Map a database row to a Notice.
fn notice_from_row(row: &SqliteRow) -> Notice {
    let author_role: String = row.get("author_role");
    let priority: String = row.get("priority");
    let pinned: i32 = row.get("pinned");

    Notice {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        author: row.get("author"),
        author_role: Role::from_str(&author_role).unwrap_or(Role::Warden),
        created_at: row.get("created_at"),
        priority: Priority::from_str(&priority).unwrap_or(Priority::Medium),
        category: row.get("category"),
        pinned: pinned != 0,
    }
}
