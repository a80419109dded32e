//! Repository port for dual-partition task persistence.

use crate::task::domain::{Partition, Task, TaskId, TaskNumber, TaskQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// A task together with the partition that currently holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedTask {
    /// The task record.
    pub task: Task,
    /// The partition the record was found in.
    pub partition: Partition,
}

/// Dual-partition task persistence contract.
///
/// A logical task has exactly one physical record at any time: in the
/// active partition while its status is `Pending`, `Review`, or
/// `Rejected`, and in the completed partition once `Completed`. Every
/// mutation is partition-aware; [`TaskStore::complete`] is the only
/// operation that moves a record between partitions, and it must do so
/// atomically.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task in the active partition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task ID already
    /// exists or [`TaskStoreError::DuplicateTaskNumber`] when the number is
    /// already in use in either partition.
    async fn create(&self, task: &Task) -> TaskStoreResult<()>;

    /// Stores a batch of new tasks, skipping duplicates.
    ///
    /// Used by bulk-import paths whose numbers come from a batch
    /// allocation that may be stale relative to concurrent writers.
    /// Returns the number of rows actually persisted, which is the
    /// authoritative insert count.
    async fn create_many(&self, tasks: &[Task]) -> TaskStoreResult<u64>;

    /// Finds a task by identifier, probing the active partition first and
    /// the completed partition second.
    ///
    /// Returns `None` when neither partition holds the id.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<LocatedTask>>;

    /// Persists changes to an existing task within whichever partition
    /// currently holds it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Atomically moves a task from the active to the completed partition.
    ///
    /// The record keeps its primary key; `archived_at` is stamped as a
    /// separate audit timestamp on the completed row. Either the removal
    /// from the active partition and the insert into the completed
    /// partition both commit, or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the active partition no
    /// longer holds the task — including when a concurrent caller already
    /// performed the move.
    async fn complete(&self, task: &Task, archived_at: DateTime<Utc>) -> TaskStoreResult<()>;

    /// Hard-deletes a task from whichever partition currently holds it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when neither partition holds
    /// the id.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Runs a partition-scoped query.
    ///
    /// Exactly one partition is read, per the query's partition choice;
    /// results are ordered by creation time, newest first.
    async fn query(&self, query: &TaskQuery) -> TaskStoreResult<Vec<Task>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A task with the same sequential number already exists.
    ///
    /// Reachable only when the allocator's existence checks lost an
    /// extreme race, or after manual data tampering.
    #[error("duplicate task number: {0}")]
    DuplicateTaskNumber(TaskNumber),

    /// The task was not found in either partition.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
