//! Entity kinds sharing the sequential code allocator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HRMS entity type owning a dedicated sequential code space.
///
/// Each kind has its own counter space; a `T-42` task code never collides
/// with a `P-42` project code even if the prefixes were equal, because
/// existence checks are always scoped to one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Top-level client group.
    ClientGroup,
    /// Company within a client group.
    Company,
    /// Physical or organisational location.
    Location,
    /// Team within a location.
    Team,
    /// Project owning tasks.
    Project,
    /// Work task.
    Task,
}

impl EntityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientGroup => "client_group",
            Self::Company => "company",
            Self::Location => "location",
            Self::Team => "team",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
