//! In-memory code directory for allocator tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::allocator::{
    domain::{CodePrefix, EntityKind},
    ports::{CodeDirectory, CodeDirectoryError, CodeDirectoryResult},
};

/// Thread-safe in-memory code directory.
///
/// Codes are stored lowercased so existence checks and prefix scans are
/// case-insensitive, matching the relational backend's behaviour.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodeDirectory {
    state: Arc<RwLock<HashMap<EntityKind, HashSet<String>>>>,
}

impl InMemoryCodeDirectory {
    /// Creates an empty in-memory code directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a code as issued for an entity type.
    ///
    /// # Errors
    ///
    /// Returns [`CodeDirectoryError::Persistence`] when the backing lock is
    /// poisoned.
    pub fn seed(&self, entity: EntityKind, code: &str) -> CodeDirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CodeDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        state
            .entry(entity)
            .or_default()
            .insert(code.to_ascii_lowercase());
        Ok(())
    }
}

#[async_trait]
impl CodeDirectory for InMemoryCodeDirectory {
    async fn issued_codes(
        &self,
        entity: EntityKind,
        prefix: &CodePrefix,
    ) -> CodeDirectoryResult<Vec<String>> {
        let state = self
            .state
            .read()
            .map_err(|err| CodeDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .get(&entity)
            .map(|codes| {
                codes
                    .iter()
                    .filter(|code| prefix.matches(code))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn code_exists(&self, entity: EntityKind, code: &str) -> CodeDirectoryResult<bool> {
        let state = self
            .state
            .read()
            .map_err(|err| CodeDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .get(&entity)
            .is_some_and(|codes| codes.contains(&code.to_ascii_lowercase())))
    }
}
