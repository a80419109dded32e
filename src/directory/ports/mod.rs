//! Port contracts for the actor directory.
//!
//! Ports define infrastructure-agnostic interfaces used by the visibility
//! resolver and the task lifecycle services.

pub mod directory;

pub use directory::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};
