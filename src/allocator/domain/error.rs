//! Error types for allocator domain validation.

use thiserror::Error;

/// Errors returned while constructing allocator domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocatorDomainError {
    /// The code prefix is empty after trimming or contains whitespace.
    #[error("invalid code prefix '{0}', expected a non-empty token without whitespace")]
    InvalidPrefix(String),
}
