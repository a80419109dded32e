//! Test-oriented notifier adapters.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::directory::domain::ActorId;
use crate::task::ports::{Notification, Notifier, NotifierError, NotifierResult};

/// Notifier that records every delivery in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(ActorId, Notification)>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with an empty delivery log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all deliveries so far.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the backing lock is
    /// poisoned.
    pub fn sent(&self) -> NotifierResult<Vec<(ActorId, Notification)>> {
        let sent = self
            .sent
            .lock()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, recipient: ActorId, notification: Notification) -> NotifierResult<()> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push((recipient, notification));
        Ok(())
    }
}

/// Notifier that fails every delivery, for exercising best-effort paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

impl FailingNotifier {
    /// Creates the always-failing notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _recipient: ActorId, _notification: Notification) -> NotifierResult<()> {
        Err(NotifierError::delivery(std::io::Error::other(
            "notification channel unavailable",
        )))
    }
}
