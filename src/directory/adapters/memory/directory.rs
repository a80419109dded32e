//! In-memory actor directory for visibility tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{Actor, ActorId},
    ports::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult},
};

/// Thread-safe in-memory actor directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActorDirectory {
    state: Arc<RwLock<HashMap<ActorId, Actor>>>,
}

impl InMemoryActorDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an actor record.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::Persistence`] when the backing lock is
    /// poisoned.
    pub fn upsert(&self, actor: Actor) -> ActorDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.insert(actor.id(), actor);
        Ok(())
    }

    /// Removes an actor record, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::Persistence`] when the backing lock is
    /// poisoned.
    pub fn remove(&self, id: ActorId) -> ActorDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>> {
        let state = self.state.read().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_active(&self) -> ActorDirectoryResult<Vec<Actor>> {
        let state = self.state.read().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.values().filter(|actor| actor.is_active()).cloned().collect())
    }
}
