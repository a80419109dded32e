//! Task aggregate root and related task lifecycle types.

use super::{ParseTaskPriorityError, ProjectId, TaskDomainError, TaskId, TaskNumber, TaskStatus};
use crate::directory::domain::{ActorId, GroupId, TeamId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Elevated urgency.
    High,
    /// Requires immediate attention.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// A remark recorded against a task during a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRemark {
    /// Actor who recorded the remark.
    pub actor: ActorId,
    /// Free-text remark body.
    pub text: String,
    /// Recording timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Parameter object for creating a new task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Sequential task number (allocated or externally supplied).
    pub number: TaskNumber,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: TaskPriority,
    /// Free-text note.
    pub note: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Optional attachment reference.
    pub attachment: Option<String>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Optional single assignee.
    pub assignee: Option<ActorId>,
    /// Optional broadcast target team (when no single assignee is set).
    pub target_team: Option<TeamId>,
    /// Optional broadcast target group (when no single assignee is set).
    pub target_group: Option<GroupId>,
    /// Creating actor.
    pub created_by: ActorId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted sequential task number.
    pub number: TaskNumber,
    /// Persisted title.
    pub title: String,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted note.
    pub note: String,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted reminder timestamps.
    pub reminders: Vec<DateTime<Utc>>,
    /// Persisted attachment reference, if any.
    pub attachment: Option<String>,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted assignee, if any.
    pub assignee: Option<ActorId>,
    /// Persisted target team, if any.
    pub target_team: Option<TeamId>,
    /// Persisted target group, if any.
    pub target_group: Option<GroupId>,
    /// Persisted creating actor.
    pub created_by: ActorId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted review submission timestamps.
    pub review_history: Vec<DateTime<Utc>>,
    /// Persisted lifecycle remarks.
    pub remarks: Vec<TaskRemark>,
    /// Persisted "currently working" actor, if any.
    pub working_actor: Option<ActorId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Patch of editable task fields.
///
/// `None` leaves a field unchanged; there is no clear-field semantics here
/// (administrative clears go through dedicated operations). A status equal
/// to the current one is a no-op rather than an invalid transition, so
/// full-record edit forms can round-trip unchanged statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// New title.
    pub title: Option<String>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New note.
    pub note: Option<String>,
    /// New deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// New attachment reference.
    pub attachment: Option<String>,
    /// New assignee.
    pub assignee: Option<ActorId>,
    /// New broadcast target team.
    pub target_team: Option<TeamId>,
    /// New broadcast target group.
    pub target_group: Option<GroupId>,
    /// Requested lifecycle status.
    pub status: Option<TaskStatus>,
    /// Actor currently working the task.
    pub working_actor: Option<ActorId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    number: TaskNumber,
    title: String,
    priority: TaskPriority,
    note: String,
    deadline: Option<DateTime<Utc>>,
    reminders: Vec<DateTime<Utc>>,
    attachment: Option<String>,
    project_id: ProjectId,
    assignee: Option<ActorId>,
    target_team: Option<TeamId>,
    target_group: Option<GroupId>,
    created_by: ActorId,
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
    review_history: Vec<DateTime<Utc>>,
    remarks: Vec<TaskRemark>,
    working_actor: Option<ActorId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in `Pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = data.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            number: data.number,
            title,
            priority: data.priority,
            note: data.note,
            deadline: data.deadline,
            reminders: Vec::new(),
            attachment: data.attachment,
            project_id: data.project_id,
            assignee: data.assignee,
            target_team: data.target_team,
            target_group: data.target_group,
            created_by: data.created_by,
            status: TaskStatus::Pending,
            completed_at: None,
            review_history: Vec::new(),
            remarks: Vec::new(),
            working_actor: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            number: data.number,
            title: data.title,
            priority: data.priority,
            note: data.note,
            deadline: data.deadline,
            reminders: data.reminders,
            attachment: data.attachment,
            project_id: data.project_id,
            assignee: data.assignee,
            target_team: data.target_team,
            target_group: data.target_group,
            created_by: data.created_by,
            status: data.status,
            completed_at: data.completed_at,
            review_history: data.review_history,
            remarks: data.remarks,
            working_actor: data.working_actor,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the sequential task number.
    #[must_use]
    pub const fn number(&self) -> &TaskNumber {
        &self.number
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the free-text note.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the recorded reminder timestamps.
    #[must_use]
    pub fn reminders(&self) -> &[DateTime<Utc>] {
        &self.reminders
    }

    /// Returns the attachment reference, if any.
    #[must_use]
    pub fn attachment(&self) -> Option<&str> {
        self.attachment.as_deref()
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<ActorId> {
        self.assignee
    }

    /// Returns the broadcast target team, if any.
    #[must_use]
    pub const fn target_team(&self) -> Option<TeamId> {
        self.target_team
    }

    /// Returns the broadcast target group, if any.
    #[must_use]
    pub const fn target_group(&self) -> Option<GroupId> {
        self.target_group
    }

    /// Returns the creating actor.
    #[must_use]
    pub const fn created_by(&self) -> ActorId {
        self.created_by
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the review submission timestamps.
    #[must_use]
    pub fn review_history(&self) -> &[DateTime<Utc>] {
        &self.review_history
    }

    /// Returns the lifecycle remarks, oldest first.
    #[must_use]
    pub fn remarks(&self) -> &[TaskRemark] {
        &self.remarks
    }

    /// Returns the actor currently working the task, if any.
    #[must_use]
    pub const fn working_actor(&self) -> Option<ActorId> {
        self.working_actor
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Submits the task for review.
    ///
    /// Valid only from `Pending`; appends a review timestamp and the
    /// submitter's remark. The task stays in the active partition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// not pending.
    pub fn submit_for_review(
        &mut self,
        actor: ActorId,
        remark: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Pending {
            return Err(self.invalid_transition(TaskStatus::Review));
        }
        let timestamp = clock.utc();
        self.status = TaskStatus::Review;
        self.review_history.push(timestamp);
        self.push_remark(actor, remark.into(), timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Finalizes the task as completed, stamping the completion timestamp.
    ///
    /// Valid from `Review` and, as a shortcut, directly from `Pending`.
    /// The caller is responsible for performing the atomic partition move
    /// that this status change mandates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// already completed or otherwise cannot complete.
    pub fn finalize_completion(
        &mut self,
        actor: ActorId,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Completed)?;
        let timestamp = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_at = Some(timestamp);
        if let Some(text) = remark {
            self.push_remark(actor, text, timestamp);
        }
        self.updated_at = timestamp;
        Ok(())
    }

    /// Rejects the task, recording the rejection reason.
    ///
    /// Valid from `Pending`, `Review`, and `Rejected` (re-rejection appends
    /// exactly one new remark). The task stays in the active partition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// already completed.
    pub fn reject(
        &mut self,
        actor: ActorId,
        remark: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Rejected)?;
        let timestamp = clock.utc();
        self.status = TaskStatus::Rejected;
        self.push_remark(actor, remark.into(), timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Appends a reminder timestamp without changing status.
    pub fn record_reminder(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.reminders.push(timestamp);
        self.updated_at = timestamp;
    }

    /// Applies a field patch, validating any requested status change.
    ///
    /// A patch status equal to the current status is a no-op. A patch
    /// status of `Completed` stamps the completion timestamp; the caller
    /// must route the persistence through the atomic partition move.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for an empty title patch and
    /// [`TaskDomainError::InvalidStateTransition`] for an unreachable
    /// status.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if let Some(raw_title) = &edit.title {
            let trimmed = raw_title.trim();
            if trimmed.is_empty() {
                return Err(TaskDomainError::EmptyTitle);
            }
            self.title = trimmed.to_owned();
        }
        if let Some(priority) = edit.priority {
            self.priority = priority;
        }
        if let Some(note) = edit.note {
            self.note = note;
        }
        if let Some(deadline) = edit.deadline {
            self.deadline = Some(deadline);
        }
        if let Some(attachment) = edit.attachment {
            self.attachment = Some(attachment);
        }
        if let Some(assignee) = edit.assignee {
            self.assignee = Some(assignee);
        }
        if let Some(target_team) = edit.target_team {
            self.target_team = Some(target_team);
        }
        if let Some(target_group) = edit.target_group {
            self.target_group = Some(target_group);
        }
        if let Some(working_actor) = edit.working_actor {
            self.working_actor = Some(working_actor);
        }

        let timestamp = clock.utc();
        if let Some(status) = edit.status
            && status != self.status
        {
            self.ensure_transition(status)?;
            self.status = status;
            if status == TaskStatus::Completed {
                self.completed_at = Some(timestamp);
            }
        }
        self.updated_at = timestamp;
        Ok(())
    }

    /// Builds the transition error for a rejected target status.
    const fn invalid_transition(&self, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStateTransition {
            task_id: self.id,
            from: self.status,
            to,
        }
    }

    /// Validates a target status against the lifecycle state machine.
    fn ensure_transition(&self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(self.invalid_transition(to))
        }
    }

    fn push_remark(&mut self, actor: ActorId, text: String, recorded_at: DateTime<Utc>) {
        self.remarks.push(TaskRemark {
            actor,
            text,
            recorded_at,
        });
    }
}
