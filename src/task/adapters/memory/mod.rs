//! In-memory adapters for task lifecycle tests and embedding.

mod access;
mod acceptance;
mod notifier;
mod store;

pub use access::PermitAllAccessControl;
pub use acceptance::InMemoryAcceptanceStore;
pub use notifier::{FailingNotifier, RecordingNotifier};
pub use store::InMemoryTaskStore;
