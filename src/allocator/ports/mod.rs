//! Port contracts for sequential identifier allocation.
//!
//! Ports define infrastructure-agnostic interfaces used by the allocator
//! service.

pub mod directory;

pub use directory::{CodeDirectory, CodeDirectoryError, CodeDirectoryResult};
