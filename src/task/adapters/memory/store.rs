//! In-memory dual-partition task store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::allocator::{
    domain::{CodePrefix, EntityKind},
    ports::{CodeDirectory, CodeDirectoryError, CodeDirectoryResult},
};
use crate::task::{
    domain::{Partition, Task, TaskId, TaskQuery},
    ports::{LocatedTask, TaskStore, TaskStoreError, TaskStoreResult},
};

/// A completed-partition record: the task plus its audit stamp.
#[derive(Debug, Clone)]
struct CompletedRecord {
    task: Task,
    archived_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Partitions {
    active: HashMap<TaskId, Task>,
    completed: HashMap<TaskId, CompletedRecord>,
}

impl Partitions {
    fn number_in_use(&self, number: &str) -> bool {
        self.active
            .values()
            .any(|task| task.number().eq_ignore_case(number))
            || self
                .completed
                .values()
                .any(|record| record.task.number().eq_ignore_case(number))
    }
}

/// Thread-safe in-memory dual-partition task store.
///
/// Both partitions live behind one lock, so the write lock is the
/// transaction boundary: the active-to-completed move is atomic by
/// construction and no reader can observe a task in both or neither
/// partition.
///
/// Also implements [`CodeDirectory`] for [`EntityKind::Task`], backed by
/// the union of both partitions' task numbers — completing a task must not
/// free its number for re-allocation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<Partitions>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory task store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the audit stamp of a completed record, if the completed
    /// partition holds the id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the backing lock is
    /// poisoned.
    pub fn archived_at(&self, id: TaskId) -> TaskStoreResult<Option<DateTime<Utc>>> {
        let state = self.read()?;
        Ok(state.completed.get(&id).map(|record| record.archived_at))
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, Partitions>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, Partitions>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.active.contains_key(&task.id()) || state.completed.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        if state.number_in_use(task.number().as_str()) {
            return Err(TaskStoreError::DuplicateTaskNumber(task.number().clone()));
        }
        state.active.insert(task.id(), task.clone());
        Ok(())
    }

    async fn create_many(&self, tasks: &[Task]) -> TaskStoreResult<u64> {
        let mut state = self.write()?;
        let mut inserted = 0;
        for task in tasks {
            let duplicate = state.active.contains_key(&task.id())
                || state.completed.contains_key(&task.id())
                || state.number_in_use(task.number().as_str());
            if duplicate {
                continue;
            }
            state.active.insert(task.id(), task.clone());
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<LocatedTask>> {
        let state = self.read()?;
        if let Some(task) = state.active.get(&id) {
            return Ok(Some(LocatedTask {
                task: task.clone(),
                partition: Partition::Active,
            }));
        }
        Ok(state.completed.get(&id).map(|record| LocatedTask {
            task: record.task.clone(),
            partition: Partition::Completed,
        }))
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if let Some(slot) = state.active.get_mut(&task.id()) {
            *slot = task.clone();
            return Ok(());
        }
        if let Some(record) = state.completed.get_mut(&task.id()) {
            record.task = task.clone();
            return Ok(());
        }
        Err(TaskStoreError::NotFound(task.id()))
    }

    async fn complete(&self, task: &Task, archived_at: DateTime<Utc>) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        // The remove is the race arbiter: a concurrent caller that already
        // moved the task finds the active slot empty and loses here.
        if state.active.remove(&task.id()).is_none() {
            return Err(TaskStoreError::NotFound(task.id()));
        }
        state.completed.insert(
            task.id(),
            CompletedRecord {
                task: task.clone(),
                archived_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.active.remove(&id).is_some() || state.completed.remove(&id).is_some() {
            return Ok(());
        }
        Err(TaskStoreError::NotFound(id))
    }

    async fn query(&self, query: &TaskQuery) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        let mut matches: Vec<Task> = match query.partition() {
            Partition::Active => state
                .active
                .values()
                .filter(|task| query.matches(task))
                .cloned()
                .collect(),
            Partition::Completed => state
                .completed
                .values()
                .map(|record| &record.task)
                .filter(|task| query.matches(task))
                .cloned()
                .collect(),
        };
        matches.sort_by_key(|task| std::cmp::Reverse(task.created_at()));
        Ok(matches)
    }
}

#[async_trait]
impl CodeDirectory for InMemoryTaskStore {
    async fn issued_codes(
        &self,
        entity: EntityKind,
        prefix: &CodePrefix,
    ) -> CodeDirectoryResult<Vec<String>> {
        if entity != EntityKind::Task {
            return Ok(Vec::new());
        }
        let state = self
            .read()
            .map_err(|err| CodeDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .active
            .values()
            .map(Task::number)
            .chain(state.completed.values().map(|record| record.task.number()))
            .filter(|number| prefix.matches(number.as_str()))
            .map(|number| number.as_str().to_owned())
            .collect())
    }

    async fn code_exists(&self, entity: EntityKind, code: &str) -> CodeDirectoryResult<bool> {
        if entity != EntityKind::Task {
            return Ok(false);
        }
        let state = self
            .read()
            .map_err(|err| CodeDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.number_in_use(code))
    }
}
