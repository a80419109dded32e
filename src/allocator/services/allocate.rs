//! Collision-safe sequential code allocation over a [`CodeDirectory`].

use crate::allocator::{
    domain::{AllocatorDomainError, CodePrefix, EntityKind, SequentialCode},
    ports::{CodeDirectory, CodeDirectoryError},
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Upper bound on consecutive candidate collisions before allocation fails.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 100;

/// Service-level errors for code allocation.
#[derive(Debug, Clone, Error)]
pub enum AllocatorError {
    /// Every candidate collided within the retry bound.
    #[error(
        "sequential code allocation for {entity} with prefix '{prefix}' \
         exhausted after {attempts} attempts"
    )]
    Exhausted {
        /// Entity kind whose code space was being allocated from.
        entity: EntityKind,
        /// Prefix of the exhausted code space.
        prefix: CodePrefix,
        /// Number of candidates probed before giving up.
        attempts: u32,
    },

    /// Prefix validation failed.
    #[error(transparent)]
    Prefix(#[from] AllocatorDomainError),

    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] CodeDirectoryError),
}

/// Result type for allocator service operations.
pub type AllocatorResult<T> = Result<T, AllocatorError>;

/// Sequential code allocator.
///
/// Tolerates concurrent callers without a distributed lock: the max-suffix
/// scan proposes a candidate and the point existence check plus bounded
/// retry loop resolves races. The underlying store's unique constraint
/// remains the last-resort backstop for the window between check and
/// insert.
#[derive(Debug, Clone)]
pub struct CodeAllocator<D>
where
    D: CodeDirectory,
{
    directory: Arc<D>,
}

impl<D> CodeAllocator<D>
where
    D: CodeDirectory,
{
    /// Creates an allocator over a code directory.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Allocates the next free code for `entity`.
    ///
    /// The numeric suffix starts at `start_offset` when no issued code
    /// carries a parseable suffix; otherwise it continues from the maximum
    /// issued suffix.
    ///
    /// # Errors
    ///
    /// Returns [`AllocatorError::Exhausted`] after
    /// [`MAX_ALLOCATION_ATTEMPTS`] consecutive collisions, or
    /// [`AllocatorError::Directory`] when the directory lookup fails.
    pub async fn allocate(
        &self,
        entity: EntityKind,
        prefix: &CodePrefix,
        start_offset: u64,
    ) -> AllocatorResult<SequentialCode> {
        let issued = self.directory.issued_codes(entity, prefix).await?;
        let mut candidate = next_suffix(&issued, prefix, start_offset);

        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let code = SequentialCode::new(prefix.clone(), candidate);
            if !self.directory.code_exists(entity, &code.to_string()).await? {
                return Ok(code);
            }
            tracing::debug!(entity = %entity, code = %code, "allocation candidate collided, retrying");
            candidate = candidate.saturating_add(1);
        }

        tracing::error!(
            entity = %entity,
            prefix = %prefix,
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "sequential code allocation exhausted"
        );
        Err(AllocatorError::Exhausted {
            entity,
            prefix: prefix.clone(),
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }

    /// Allocates `count` codes for a bulk-create path.
    ///
    /// The issued-code set is loaded once; candidates are drawn from an
    /// in-memory counter and checked against that set (including codes
    /// issued earlier in the same call), with no per-item directory round
    /// trip. The set can be stale relative to concurrent writers, so bulk
    /// inserts must still apply skip-on-duplicate semantics and report what
    /// was actually persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AllocatorError::Directory`] when the directory lookup
    /// fails.
    pub async fn allocate_batch(
        &self,
        entity: EntityKind,
        prefix: &CodePrefix,
        start_offset: u64,
        count: usize,
    ) -> AllocatorResult<Vec<SequentialCode>> {
        let issued = self.directory.issued_codes(entity, prefix).await?;
        let mut taken: HashSet<String> =
            issued.iter().map(|code| code.to_ascii_lowercase()).collect();
        let mut next = next_suffix(&issued, prefix, start_offset);

        let mut codes = Vec::with_capacity(count);
        while codes.len() < count {
            let code = SequentialCode::new(prefix.clone(), next);
            if taken.insert(code.to_string().to_ascii_lowercase()) {
                codes.push(code);
            }
            next = next.saturating_add(1);
        }
        Ok(codes)
    }
}

/// Computes the first candidate suffix from the issued-code scan.
///
/// Unparseable suffixes are ignored; when nothing parses the suffix space
/// begins at `start_offset`.
fn next_suffix(issued: &[String], prefix: &CodePrefix, start_offset: u64) -> u64 {
    issued
        .iter()
        .filter_map(|code| prefix.numeric_suffix(code))
        .max()
        .unwrap_or_else(|| start_offset.saturating_sub(1))
        .saturating_add(1)
}
