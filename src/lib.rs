//! Foreman: task lifecycle and hierarchical visibility core for an HRMS
//! backend.
//!
//! This crate implements the stateful heart of a role-based HRMS: task
//! lifecycle management over a dual-partition store (active vs. completed),
//! null-wildcard hierarchical visibility for team views, collision-safe
//! sequential identifier allocation shared by every entity type, and a
//! task-scoped acceptance workflow layered on top of the primary lifecycle.
//!
//! # Architecture
//!
//! Foreman follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`allocator`]: Sequential `PREFIX-N` code allocation per entity type
//! - [`directory`]: Actor directory port and peer visibility resolution
//! - [`task`]: Task lifecycle, dual-partition persistence, and acceptance

pub mod allocator;
pub mod directory;
pub mod task;
