//! Diesel row models for the dual-partition task store.

use super::schema::{active_tasks, completed_tasks, task_acceptances};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for the active partition.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = active_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActiveTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Sequential task number.
    pub number: String,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: String,
    /// Free-text note.
    pub note: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Reminder timestamps as JSON.
    pub reminders: Value,
    /// Optional attachment reference.
    pub attachment: Option<String>,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional single assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Optional broadcast target team.
    pub target_team: Option<uuid::Uuid>,
    /// Optional broadcast target group.
    pub target_group: Option<uuid::Uuid>,
    /// Creating actor identifier.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Review submission timestamps as JSON.
    pub review_history: Value,
    /// Lifecycle remarks as JSON.
    pub remarks: Value,
    /// Actor currently working the task, if any.
    pub working_actor: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for the active partition.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = active_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewActiveTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Sequential task number.
    pub number: String,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: String,
    /// Free-text note.
    pub note: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Reminder timestamps as JSON.
    pub reminders: Value,
    /// Optional attachment reference.
    pub attachment: Option<String>,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional single assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Optional broadcast target team.
    pub target_team: Option<uuid::Uuid>,
    /// Optional broadcast target group.
    pub target_group: Option<uuid::Uuid>,
    /// Creating actor identifier.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Review submission timestamps as JSON.
    pub review_history: Value,
    /// Lifecycle remarks as JSON.
    pub remarks: Value,
    /// Actor currently working the task, if any.
    pub working_actor: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for the completed partition.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = completed_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompletedTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Sequential task number.
    pub number: String,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: String,
    /// Free-text note.
    pub note: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Reminder timestamps as JSON.
    pub reminders: Value,
    /// Optional attachment reference.
    pub attachment: Option<String>,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional single assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Optional broadcast target team.
    pub target_team: Option<uuid::Uuid>,
    /// Optional broadcast target group.
    pub target_group: Option<uuid::Uuid>,
    /// Creating actor identifier.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Review submission timestamps as JSON.
    pub review_history: Value,
    /// Lifecycle remarks as JSON.
    pub remarks: Value,
    /// Actor currently working the task, if any.
    pub working_actor: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Timestamp of the partition move.
    pub archived_at: DateTime<Utc>,
}

/// Insert model for the completed partition.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = completed_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewCompletedTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Sequential task number.
    pub number: String,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: String,
    /// Free-text note.
    pub note: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Reminder timestamps as JSON.
    pub reminders: Value,
    /// Optional attachment reference.
    pub attachment: Option<String>,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Optional single assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Optional broadcast target team.
    pub target_team: Option<uuid::Uuid>,
    /// Optional broadcast target group.
    pub target_group: Option<uuid::Uuid>,
    /// Creating actor identifier.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Review submission timestamps as JSON.
    pub review_history: Value,
    /// Lifecycle remarks as JSON.
    pub remarks: Value,
    /// Actor currently working the task, if any.
    pub working_actor: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Timestamp of the partition move.
    pub archived_at: DateTime<Utc>,
}

/// Query result row for acceptance records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_acceptances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AcceptanceRow {
    /// Internal acceptance identifier.
    pub id: uuid::Uuid,
    /// Task the acceptance belongs to.
    pub task_id: uuid::Uuid,
    /// Responding actor.
    pub actor_id: uuid::Uuid,
    /// Decision state.
    pub decision: String,
    /// Optional response remark.
    pub remark: Option<String>,
    /// Response timestamp, if responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for acceptance records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = task_acceptances)]
#[diesel(treat_none_as_null = true)]
pub struct NewAcceptanceRow {
    /// Internal acceptance identifier.
    pub id: uuid::Uuid,
    /// Task the acceptance belongs to.
    pub task_id: uuid::Uuid,
    /// Responding actor.
    pub actor_id: uuid::Uuid,
    /// Decision state.
    pub decision: String,
    /// Optional response remark.
    pub remark: Option<String>,
    /// Response timestamp, if responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
