//! Directory port exposing the set of already-issued codes per entity type.

use crate::allocator::domain::{CodePrefix, EntityKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for code directory operations.
pub type CodeDirectoryResult<T> = Result<T, CodeDirectoryError>;

/// Read-only view over the codes currently in use for an entity type.
///
/// A counter space is never stored explicitly; it is materialized only as
/// the set of issued codes, which this port exposes. Implementations back
/// onto whichever store holds the entity records (for tasks, the union of
/// both task partitions).
#[async_trait]
pub trait CodeDirectory: Send + Sync {
    /// Returns all codes in use for `entity` whose prefix matches `prefix`
    /// case-insensitively.
    async fn issued_codes(
        &self,
        entity: EntityKind,
        prefix: &CodePrefix,
    ) -> CodeDirectoryResult<Vec<String>>;

    /// Returns whether `code` is already in use for `entity`, ignoring ASCII
    /// case.
    ///
    /// This point probe defends against codes the max-suffix scan cannot
    /// account for (e.g. suffixes outside the parseable range).
    async fn code_exists(&self, entity: EntityKind, code: &str) -> CodeDirectoryResult<bool>;
}

/// Errors returned by code directory implementations.
#[derive(Debug, Clone, Error)]
pub enum CodeDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CodeDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
