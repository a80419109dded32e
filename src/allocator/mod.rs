//! Cross-entity sequential identifier allocation.
//!
//! Every HRMS entity type carries a human-readable `PREFIX-N` code assigned
//! at creation time. This module owns the allocation algorithm: scan the
//! codes already issued for an entity type, compute the next numeric suffix,
//! and verify the candidate against the directory with a bounded retry loop
//! so concurrent callers never need a distributed lock. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
