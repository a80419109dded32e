//! Access-control port consulted before mutating task operations.

use crate::directory::domain::Actor;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for access-control checks.
pub type AccessControlResult<T> = Result<T, AccessControlError>;

/// Mutating operation classes subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    /// Create a new task.
    Create,
    /// Edit task fields.
    Edit,
    /// Change broadcast targets (team/group reassignment).
    Reassign,
    /// Hard-delete a task.
    Delete,
}

impl TaskAction {
    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Reassign => "reassign",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External access-control contract.
///
/// Policy rules live with the external collaborator; this core only asks
/// allow/deny questions before mutating.
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Returns whether the actor may perform the action.
    async fn allows(&self, actor: &Actor, action: TaskAction) -> AccessControlResult<bool>;
}

/// Errors returned by access-control implementations.
#[derive(Debug, Clone, Error)]
pub enum AccessControlError {
    /// Policy evaluation failure.
    #[error("access control evaluation failed: {0}")]
    Evaluation(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccessControlError {
    /// Wraps an evaluation error.
    pub fn evaluation(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Evaluation(Arc::new(err))
    }
}
