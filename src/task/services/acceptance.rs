//! Acceptance workflow for assigned tasks.

use crate::directory::domain::ActorId;
use crate::task::{
    domain::{AcceptanceResponse, Task, TaskAcceptance, TaskDomainError, TaskId},
    ports::{AcceptanceStore, AcceptanceStoreError, TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for the acceptance workflow.
#[derive(Debug, Error)]
pub enum AcceptanceError {
    /// Domain validation failed (already decided).
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Acceptance store operation failed.
    #[error(transparent)]
    Store(#[from] AcceptanceStoreError),
    /// Task store lookup failed.
    #[error(transparent)]
    TaskStore(#[from] TaskStoreError),
    /// No acceptance record exists for the task and actor.
    #[error("no acceptance for task {task_id} and actor {actor_id}")]
    NotFound {
        /// The queried task.
        task_id: TaskId,
        /// The queried actor.
        actor_id: ActorId,
    },
}

/// Result type for acceptance service operations.
pub type AcceptanceResult<T> = Result<T, AcceptanceError>;

/// An outstanding acceptance joined with its task.
#[derive(Debug, Clone)]
pub struct PendingAcceptance {
    /// The outstanding acceptance record.
    pub acceptance: TaskAcceptance,
    /// The task awaiting the actor's response.
    pub task: Task,
}

/// Acceptance workflow service.
///
/// Runs beside the primary lifecycle and never mutates the task itself:
/// a rejected acceptance leaves the task assigned and its status
/// untouched, which is a signal for a supervisor, not a transition.
#[derive(Clone)]
pub struct AcceptanceService<P, S, K>
where
    P: AcceptanceStore,
    S: TaskStore,
    K: Clock + Send + Sync,
{
    acceptances: Arc<P>,
    store: Arc<S>,
    clock: Arc<K>,
}

impl<P, S, K> AcceptanceService<P, S, K>
where
    P: AcceptanceStore,
    S: TaskStore,
    K: Clock + Send + Sync,
{
    /// Creates a new acceptance service.
    #[must_use]
    pub const fn new(acceptances: Arc<P>, store: Arc<S>, clock: Arc<K>) -> Self {
        Self {
            acceptances,
            store,
            clock,
        }
    }

    /// Records an actor's response to an outstanding acceptance.
    ///
    /// # Errors
    ///
    /// Returns [`AcceptanceError::NotFound`] when no record exists,
    /// [`AcceptanceError::Domain`] when the record was already decided, or
    /// a store error.
    pub async fn respond(
        &self,
        task_id: TaskId,
        actor_id: ActorId,
        response: AcceptanceResponse,
        remark: Option<String>,
    ) -> AcceptanceResult<TaskAcceptance> {
        let Some(mut acceptance) = self
            .acceptances
            .find_by_task_and_actor(task_id, actor_id)
            .await?
        else {
            return Err(AcceptanceError::NotFound { task_id, actor_id });
        };
        acceptance.respond(response, remark, &*self.clock)?;
        self.acceptances.update(&acceptance).await?;
        Ok(acceptance)
    }

    /// Lists an actor's outstanding acceptances joined with their tasks.
    ///
    /// Records whose task has since been deleted are skipped.
    ///
    /// # Errors
    ///
    /// Returns acceptance or task store errors.
    pub async fn pending_for(&self, actor_id: ActorId) -> AcceptanceResult<Vec<PendingAcceptance>> {
        let outstanding = self.acceptances.find_pending_by_actor(actor_id).await?;
        let mut pending = Vec::with_capacity(outstanding.len());
        for acceptance in outstanding {
            if let Some(located) = self.store.find_by_id(acceptance.task_id()).await? {
                pending.push(PendingAcceptance {
                    acceptance,
                    task: located.task,
                });
            }
        }
        Ok(pending)
    }
}
