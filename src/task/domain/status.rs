//! Task lifecycle status and the physical partition it maps to.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical home of a task record.
///
/// A task lives in exactly one partition at any time; queries address
/// exactly one partition so the exclusivity invariant stays observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Store holding tasks not yet completed.
    Active,
    /// Store holding tasks whose lifecycle reached `Completed`.
    Completed,
}

impl Partition {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created; work or review has not concluded.
    Pending,
    /// Task is awaiting review.
    Review,
    /// Task has been completed and migrated to the completed partition.
    Completed,
    /// Task was rejected during review; reworkable.
    Rejected,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether the status terminates the lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the partition a task with this status must reside in.
    #[must_use]
    pub const fn partition(self) -> Partition {
        match self {
            Self::Pending | Self::Review | Self::Rejected => Partition::Active,
            Self::Completed => Partition::Completed,
        }
    }

    /// Returns whether the lifecycle permits moving from `self` to `to`.
    ///
    /// Completion may be reached directly from `Pending`, skipping review;
    /// re-rejecting an already-rejected task is permitted so a fresh
    /// rejection remark can be recorded.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        match self {
            Self::Pending => matches!(to, Self::Review | Self::Completed | Self::Rejected),
            Self::Review => matches!(to, Self::Completed | Self::Rejected),
            Self::Rejected => matches!(to, Self::Pending | Self::Review | Self::Rejected),
            Self::Completed => false,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "review" => Ok(Self::Review),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
