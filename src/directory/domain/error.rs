//! Error types for actor domain parsing.

use thiserror::Error;

/// Error returned while parsing actor roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor role: {0}")]
pub struct ParseActorRoleError(pub String);

/// Error returned while parsing actor statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor status: {0}")]
pub struct ParseActorStatusError(pub String);
