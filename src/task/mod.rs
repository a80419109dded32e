//! Task lifecycle management over a dual-partition store.
//!
//! Tasks progress Pending → Review → Completed/Rejected, and the
//! completed-vs-active distinction is encoded physically: a task lives in
//! the active partition until completion, at which point it is migrated to
//! the completed partition in one atomic move. This module owns the state
//! machine, the dual-partition store contract, view-mode query resolution
//! backed by the visibility resolver, and the task-scoped acceptance
//! workflow layered on top of the primary lifecycle. The module follows
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
