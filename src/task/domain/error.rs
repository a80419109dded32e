//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task number is empty after trimming.
    #[error("task number must not be empty")]
    EmptyTaskNumber,

    /// The requested status change is not reachable from the current
    /// status.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task the transition was requested on.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller requested.
        to: TaskStatus,
    },

    /// The acceptance record has already been responded to.
    #[error("acceptance for task {task_id} has already been decided")]
    AcceptanceAlreadyDecided {
        /// Task the acceptance belongs to.
        task_id: TaskId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing acceptance decisions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown acceptance decision: {0}")]
pub struct ParseAcceptanceDecisionError(pub String);
