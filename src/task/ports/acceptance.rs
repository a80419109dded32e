//! Repository port for task acceptance records.

use crate::directory::domain::ActorId;
use crate::task::domain::{TaskAcceptance, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for acceptance store operations.
pub type AcceptanceStoreResult<T> = Result<T, AcceptanceStoreError>;

/// Persistence contract for the acceptance overlay.
#[async_trait]
pub trait AcceptanceStore: Send + Sync {
    /// Stores a new acceptance record.
    ///
    /// # Errors
    ///
    /// Returns [`AcceptanceStoreError::DuplicateAcceptance`] when the task
    /// already has an acceptance record for the actor.
    async fn store(&self, acceptance: &TaskAcceptance) -> AcceptanceStoreResult<()>;

    /// Persists a response to an existing acceptance record.
    ///
    /// # Errors
    ///
    /// Returns [`AcceptanceStoreError::NotFound`] when the record does not
    /// exist.
    async fn update(&self, acceptance: &TaskAcceptance) -> AcceptanceStoreResult<()>;

    /// Finds the acceptance record for a task/actor pair.
    async fn find_by_task_and_actor(
        &self,
        task_id: TaskId,
        actor_id: ActorId,
    ) -> AcceptanceStoreResult<Option<TaskAcceptance>>;

    /// Returns all outstanding acceptance records for an actor.
    async fn find_pending_by_actor(
        &self,
        actor_id: ActorId,
    ) -> AcceptanceStoreResult<Vec<TaskAcceptance>>;
}

/// Errors returned by acceptance store implementations.
#[derive(Debug, Clone, Error)]
pub enum AcceptanceStoreError {
    /// An acceptance record for the task/actor pair already exists.
    #[error("duplicate acceptance for task {task_id} and actor {actor_id}")]
    DuplicateAcceptance {
        /// Task the duplicate belongs to.
        task_id: TaskId,
        /// Actor the duplicate belongs to.
        actor_id: ActorId,
    },

    /// No acceptance record exists for the task/actor pair.
    #[error("no acceptance for task {task_id} and actor {actor_id}")]
    NotFound {
        /// Task the lookup targeted.
        task_id: TaskId,
        /// Actor the lookup targeted.
        actor_id: ActorId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AcceptanceStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
