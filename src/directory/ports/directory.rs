//! Directory port for actor lookup and active-actor listing.

use crate::directory::domain::{Actor, ActorId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for actor directory operations.
pub type ActorDirectoryResult<T> = Result<T, ActorDirectoryError>;

/// Read-only view over the external HRMS actor store.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Finds an actor by identifier.
    ///
    /// Returns `None` when the actor does not exist (including actors
    /// deleted after issuing a still-live session).
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>>;

    /// Returns all actors with active status.
    ///
    /// Only these participate in peer computation.
    async fn list_active(&self) -> ActorDirectoryResult<Vec<Actor>>;
}

/// Errors returned by actor directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ActorDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActorDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
