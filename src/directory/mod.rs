//! Actor directory and hierarchical visibility resolution.
//!
//! Actors sit in a four-level organisational hierarchy (group → company →
//! location → sub-location) where an unset level acts as a wildcard. This
//! module owns the peer predicate and the resolver that computes the set of
//! actors visible to a reference actor for "team" views. The actor records
//! themselves live in an external HRMS store reached through the
//! [`ports::ActorDirectory`] port. The module follows hexagonal
//! architecture:
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
