//! Fire-and-forget notification dispatch port.

use crate::directory::domain::ActorId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification dispatch.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Category of a lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to the recipient.
    TaskAssigned,
    /// The recipient was reminded of an open task.
    TaskReminder,
}

impl NotificationKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskReminder => "task_reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to the external notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short notification title.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Notification category.
    pub kind: NotificationKind,
    /// Structured metadata (task id, number, …).
    pub metadata: Value,
}

/// External notification dispatch contract.
///
/// Delivery is best-effort: lifecycle services log and swallow failures,
/// because the lifecycle transition is the authoritative outcome.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatches a notification to a recipient actor.
    async fn notify(&self, recipient: ActorId, notification: Notification) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// Delivery-layer failure.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
