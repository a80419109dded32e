//! Peer-set resolution for "team" query scopes.

use crate::directory::{
    domain::{Actor, ActorId},
    ports::{ActorDirectory, ActorDirectoryError},
};
use std::collections::HashSet;
use std::sync::Arc;

/// Result type for visibility resolution.
pub type VisibilityResult<T> = Result<T, ActorDirectoryError>;

/// Resolves the set of actors visible to a reference actor.
///
/// Visibility follows the null-wildcard hierarchy rule evaluated by
/// [`HierarchyScope::is_peer_of`](crate::directory::domain::HierarchyScope::is_peer_of):
/// an actor with an unset level is visible to every team view at that
/// level. Only active actors participate.
#[derive(Debug, Clone)]
pub struct VisibilityResolver<D>
where
    D: ActorDirectory,
{
    directory: Arc<D>,
}

impl<D> VisibilityResolver<D>
where
    D: ActorDirectory,
{
    /// Creates a resolver over an actor directory.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Returns the shared actor directory handle.
    #[must_use]
    pub const fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// Computes the peer-actor id set for a reference actor.
    ///
    /// A missing reference actor (already deleted) degrades to the empty
    /// set rather than an error, so team views render empty instead of
    /// failing. The reference actor is included by construction: its scope
    /// trivially matches itself.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError`] when the directory lookup fails.
    pub async fn peer_ids(&self, reference: ActorId) -> VisibilityResult<HashSet<ActorId>> {
        let Some(reference_actor) = self.directory.find_by_id(reference).await? else {
            return Ok(HashSet::new());
        };

        let candidates = self.directory.list_active().await?;
        Ok(candidates
            .iter()
            .filter(|candidate| candidate.scope().is_peer_of(reference_actor.scope()))
            .map(Actor::id)
            .collect())
    }
}
