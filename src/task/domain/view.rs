//! View modes and the query predicates they resolve to.

use super::{Partition, Task, TaskStatus};
use crate::directory::domain::{ActorId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Named query scope combining a partition choice and a visibility
/// predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Tasks assigned to the actor and still pending.
    MyPending,
    /// Completed tasks assigned to the actor.
    MyCompleted,
    /// Pending tasks assigned within the actor's peer set or targeted at
    /// the actor's team.
    TeamPending,
    /// Completed tasks assigned within the actor's peer set or targeted at
    /// the actor's team.
    TeamCompleted,
    /// Tasks created by the actor that await review.
    ReviewPendingByMe,
    /// Tasks created within the actor's peer set that await review.
    ReviewPendingByTeam,
}

impl ViewMode {
    /// Returns the single partition this view mode reads.
    ///
    /// A view never reads both partitions; this keeps the exactly-one-home
    /// invariant observable.
    #[must_use]
    pub const fn partition(self) -> Partition {
        match self {
            Self::MyCompleted | Self::TeamCompleted => Partition::Completed,
            Self::MyPending
            | Self::TeamPending
            | Self::ReviewPendingByMe
            | Self::ReviewPendingByTeam => Partition::Active,
        }
    }
}

/// Visibility predicate of a task query.
///
/// Built explicitly (rather than inline in storage code) so the peer and
/// ownership rules can be unit-tested independent of any backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Tasks assigned to one actor.
    AssignedTo {
        /// The assignee to match.
        actor: ActorId,
        /// Status constraint, or `None` for any status in the partition.
        status: Option<TaskStatus>,
    },
    /// Tasks assigned within a peer set or targeted at a team.
    AssignedWithin {
        /// Peer-actor ids whose assignments are visible.
        peers: HashSet<ActorId>,
        /// The actor's team for broadcast-target matching, if any.
        target_team: Option<TeamId>,
        /// Status constraint, or `None` for any status in the partition.
        status: Option<TaskStatus>,
    },
    /// Tasks created by one actor, constrained to a status.
    CreatedBy {
        /// The creator to match.
        actor: ActorId,
        /// Required status.
        status: TaskStatus,
    },
    /// Tasks created within a peer set, constrained to a status.
    CreatedWithin {
        /// Peer-actor ids whose created tasks are visible.
        peers: HashSet<ActorId>,
        /// Required status.
        status: TaskStatus,
    },
}

impl TaskFilter {
    /// Evaluates the predicate against a task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::AssignedTo { actor, status } => {
                task.assignee() == Some(*actor) && status_matches(task, *status)
            }
            Self::AssignedWithin {
                peers,
                target_team,
                status,
            } => {
                let assigned_in_peers = task
                    .assignee()
                    .is_some_and(|assignee| peers.contains(&assignee));
                let targeted_at_team = target_team
                    .is_some_and(|team| task.target_team() == Some(team));
                (assigned_in_peers || targeted_at_team) && status_matches(task, *status)
            }
            Self::CreatedBy { actor, status } => {
                task.created_by() == *actor && task.status() == *status
            }
            Self::CreatedWithin { peers, status } => {
                peers.contains(&task.created_by()) && task.status() == *status
            }
        }
    }
}

fn status_matches(task: &Task, status: Option<TaskStatus>) -> bool {
    status.is_none_or(|required| task.status() == required)
}

/// A partition-scoped task query with an optional free-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    partition: Partition,
    filter: TaskFilter,
    search: Option<String>,
}

impl TaskQuery {
    /// Creates a query for one partition.
    #[must_use]
    pub const fn new(partition: Partition, filter: TaskFilter) -> Self {
        Self {
            partition,
            filter,
            search: None,
        }
    }

    /// Adds a free-text search term, ANDed with the filter.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Returns the partition this query reads.
    #[must_use]
    pub const fn partition(&self) -> Partition {
        self.partition
    }

    /// Returns the visibility predicate.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Evaluates filter and search against a task.
    ///
    /// Search matches the title, number, or note case-insensitively.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if !self.filter.matches(task) {
            return false;
        }
        self.search.as_deref().is_none_or(|term| {
            let needle = term.to_lowercase();
            task.title().to_lowercase().contains(&needle)
                || task.number().as_str().to_lowercase().contains(&needle)
                || task.note().to_lowercase().contains(&needle)
        })
    }
}
