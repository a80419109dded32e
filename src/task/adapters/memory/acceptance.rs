//! In-memory acceptance store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::ActorId;
use crate::task::{
    domain::{AcceptanceId, TaskAcceptance, TaskId},
    ports::{AcceptanceStore, AcceptanceStoreError, AcceptanceStoreResult},
};

/// Thread-safe in-memory acceptance store.
///
/// Enforces the one-acceptance-per-assignment rule: storing a second record
/// for the same task and actor fails with
/// [`AcceptanceStoreError::DuplicateAcceptance`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAcceptanceStore {
    records: Arc<RwLock<HashMap<AcceptanceId, TaskAcceptance>>>,
}

impl InMemoryAcceptanceStore {
    /// Creates an empty in-memory acceptance store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> AcceptanceStoreResult<std::sync::RwLockReadGuard<'_, HashMap<AcceptanceId, TaskAcceptance>>>
    {
        self.records
            .read()
            .map_err(|err| AcceptanceStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(
        &self,
    ) -> AcceptanceStoreResult<std::sync::RwLockWriteGuard<'_, HashMap<AcceptanceId, TaskAcceptance>>>
    {
        self.records
            .write()
            .map_err(|err| AcceptanceStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl AcceptanceStore for InMemoryAcceptanceStore {
    async fn store(&self, acceptance: &TaskAcceptance) -> AcceptanceStoreResult<()> {
        let mut records = self.write()?;
        let duplicate = records.values().any(|existing| {
            existing.task_id() == acceptance.task_id()
                && existing.actor_id() == acceptance.actor_id()
        });
        if duplicate {
            return Err(AcceptanceStoreError::DuplicateAcceptance {
                task_id: acceptance.task_id(),
                actor_id: acceptance.actor_id(),
            });
        }
        records.insert(acceptance.id(), acceptance.clone());
        Ok(())
    }

    async fn update(&self, acceptance: &TaskAcceptance) -> AcceptanceStoreResult<()> {
        let mut records = self.write()?;
        let Some(slot) = records.get_mut(&acceptance.id()) else {
            return Err(AcceptanceStoreError::NotFound {
                task_id: acceptance.task_id(),
                actor_id: acceptance.actor_id(),
            });
        };
        *slot = acceptance.clone();
        Ok(())
    }

    async fn find_by_task_and_actor(
        &self,
        task_id: TaskId,
        actor_id: ActorId,
    ) -> AcceptanceStoreResult<Option<TaskAcceptance>> {
        let records = self.read()?;
        Ok(records
            .values()
            .find(|record| record.task_id() == task_id && record.actor_id() == actor_id)
            .cloned())
    }

    async fn find_pending_by_actor(
        &self,
        actor_id: ActorId,
    ) -> AcceptanceStoreResult<Vec<TaskAcceptance>> {
        let records = self.read()?;
        let mut pending: Vec<TaskAcceptance> = records
            .values()
            .filter(|record| record.actor_id() == actor_id && record.is_outstanding())
            .cloned()
            .collect();
        pending.sort_by_key(TaskAcceptance::created_at);
        Ok(pending)
    }
}
