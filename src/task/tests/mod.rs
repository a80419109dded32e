//! Unit tests for the task module.

mod acceptance_tests;
mod domain_tests;
mod store_tests;
