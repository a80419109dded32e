//! Task-scoped acceptance records layered on top of the primary lifecycle.

use super::{AcceptanceId, ParseAcceptanceDecisionError, TaskDomainError, TaskId};
use crate::directory::domain::ActorId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision state of an acceptance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceDecision {
    /// No response recorded yet.
    Pending,
    /// The assignee accepted the assignment.
    Accepted,
    /// The assignee rejected the assignment.
    Rejected,
}

impl AcceptanceDecision {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AcceptanceDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AcceptanceDecision {
    type Error = ParseAcceptanceDecisionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseAcceptanceDecisionError(value.to_owned())),
        }
    }
}

/// An actor's response to an outstanding acceptance.
///
/// Separate from [`AcceptanceDecision`] because `Pending` is never a valid
/// response, only an initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceResponse {
    /// Accept the assignment.
    Accepted,
    /// Reject the assignment.
    Rejected,
}

impl AcceptanceResponse {
    /// Returns the decision this response settles the record into.
    #[must_use]
    pub const fn decision(self) -> AcceptanceDecision {
        match self {
            Self::Accepted => AcceptanceDecision::Accepted,
            Self::Rejected => AcceptanceDecision::Rejected,
        }
    }
}

/// Acceptance record for a task assigned to a specific actor.
///
/// Independent of the task's primary status: a task can be `Pending` at
/// the lifecycle level while its acceptance is still outstanding. The
/// acceptance workflow never mutates the task itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAcceptance {
    id: AcceptanceId,
    task_id: TaskId,
    actor_id: ActorId,
    decision: AcceptanceDecision,
    remark: Option<String>,
    responded_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted acceptance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAcceptanceData {
    /// Persisted acceptance identifier.
    pub id: AcceptanceId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted responding actor.
    pub actor_id: ActorId,
    /// Persisted decision state.
    pub decision: AcceptanceDecision,
    /// Persisted response remark, if any.
    pub remark: Option<String>,
    /// Persisted response timestamp, if responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskAcceptance {
    /// Creates an outstanding acceptance for a freshly assigned task.
    #[must_use]
    pub fn new(task_id: TaskId, actor_id: ActorId, clock: &impl Clock) -> Self {
        Self {
            id: AcceptanceId::new(),
            task_id,
            actor_id,
            decision: AcceptanceDecision::Pending,
            remark: None,
            responded_at: None,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an acceptance record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAcceptanceData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            actor_id: data.actor_id,
            decision: data.decision,
            remark: data.remark,
            responded_at: data.responded_at,
            created_at: data.created_at,
        }
    }

    /// Returns the acceptance identifier.
    #[must_use]
    pub const fn id(&self) -> AcceptanceId {
        self.id
    }

    /// Returns the task this acceptance belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the responding actor.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the decision state.
    #[must_use]
    pub const fn decision(&self) -> AcceptanceDecision {
        self.decision
    }

    /// Returns the response remark, if any.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Returns the response timestamp, if responded.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the record still awaits a response.
    #[must_use]
    pub const fn is_outstanding(&self) -> bool {
        matches!(self.decision, AcceptanceDecision::Pending)
    }

    /// Records the actor's response.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AcceptanceAlreadyDecided`] when the
    /// record has already been responded to.
    pub fn respond(
        &mut self,
        response: AcceptanceResponse,
        remark: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.is_outstanding() {
            return Err(TaskDomainError::AcceptanceAlreadyDecided {
                task_id: self.task_id,
            });
        }
        self.decision = response.decision();
        self.remark = remark;
        self.responded_at = Some(clock.utc());
        Ok(())
    }
}
