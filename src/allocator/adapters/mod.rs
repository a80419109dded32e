//! Adapter implementations of the allocator ports.

pub mod memory;
