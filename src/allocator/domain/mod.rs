//! Domain model for sequential identifier allocation.
//!
//! The allocator domain models entity-scoped code spaces and the validated
//! `PREFIX-N` code format while keeping directory lookups outside of the
//! domain boundary.

mod code;
mod entity;
mod error;

pub use code::{CodePrefix, SequentialCode};
pub use entity::EntityKind;
pub use error::AllocatorDomainError;
