//! Unit tests for the allocator module.

mod domain_tests;
mod service_tests;
