//! Adapter implementations of the actor directory ports.

pub mod memory;
