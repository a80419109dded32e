//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! the dual-partition store, the acceptance store, and the external
//! notification and access-control collaborators.

pub mod access;
pub mod acceptance;
pub mod notifier;
pub mod store;

pub use access::{AccessControl, AccessControlError, AccessControlResult, TaskAction};
pub use acceptance::{AcceptanceStore, AcceptanceStoreError, AcceptanceStoreResult};
pub use notifier::{Notification, NotificationKind, Notifier, NotifierError, NotifierResult};
pub use store::{LocatedTask, TaskStore, TaskStoreError, TaskStoreResult};
