//! Unit tests for the directory module.

mod peer_predicate_tests;
mod resolver_tests;
