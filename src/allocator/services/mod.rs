//! Application services for sequential identifier allocation.

mod allocate;

pub use allocate::{AllocatorError, AllocatorResult, CodeAllocator, MAX_ALLOCATION_ATTEMPTS};
