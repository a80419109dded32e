//! Permissive access-control adapter.

use async_trait::async_trait;

use crate::directory::domain::Actor;
use crate::task::ports::{AccessControl, AccessControlResult, TaskAction};

/// Access-control adapter that allows every action.
///
/// Deployments plug a policy engine in behind the port; this stands in
/// wherever authorisation is out of scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermitAllAccessControl;

impl PermitAllAccessControl {
    /// Creates the permissive adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccessControl for PermitAllAccessControl {
    async fn allows(&self, _actor: &Actor, _action: TaskAction) -> AccessControlResult<bool> {
        Ok(true)
    }
}
