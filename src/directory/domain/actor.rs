//! Actor aggregate and the null-wildcard hierarchy peer predicate.

use super::{
    ActorId, CompanyId, GroupId, LocationId, ParseActorRoleError, ParseActorStatusError,
    SubLocationId, TeamId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to an actor identity by the external auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Full administrative access.
    Admin,
    /// HR staff with cross-team privileges.
    Hr,
    /// Team or project manager.
    Manager,
    /// Regular employee.
    Employee,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Returns whether the role may mutate records owned by other actors
    /// (delete foreign tasks, reassign targets).
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "hr" => Ok(Self::Hr),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}

/// Lifecycle status of an actor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorStatus {
    /// The actor participates in visibility and assignment.
    Active,
    /// The actor is excluded from peer computation and team views.
    Inactive,
}

impl ActorStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ActorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActorStatus {
    type Error = ParseActorStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseActorStatusError(value.to_owned())),
        }
    }
}

/// The four nullable hierarchy attributes placing an actor in the
/// organisation.
///
/// An unset level means "applies to all values at that level": group-level
/// HR staff carry no company, location, or sub-location and are therefore
/// visible to every team view below their group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HierarchyScope {
    /// Client group level, or `None` for all groups.
    pub group_id: Option<GroupId>,
    /// Company level, or `None` for all companies.
    pub company_id: Option<CompanyId>,
    /// Location level, or `None` for all locations.
    pub location_id: Option<LocationId>,
    /// Sub-location level, or `None` for all sub-locations.
    pub sub_location_id: Option<SubLocationId>,
}

impl HierarchyScope {
    /// Creates a fully unset (all-wildcard) scope.
    #[must_use]
    pub const fn unscoped() -> Self {
        Self {
            group_id: None,
            company_id: None,
            location_id: None,
            sub_location_id: None,
        }
    }

    /// Evaluates the peer predicate against a reference scope.
    ///
    /// `self` is a peer of `reference` iff, for every one of the four
    /// levels, the candidate value is unset **or** equals the reference
    /// value. The conjunction runs across levels; each level's own
    /// condition is the match-or-wildcard disjunction. Note the asymmetry:
    /// a set candidate level never matches an unset reference level.
    #[must_use]
    pub fn is_peer_of(&self, reference: &Self) -> bool {
        level_matches(self.group_id, reference.group_id)
            && level_matches(self.company_id, reference.company_id)
            && level_matches(self.location_id, reference.location_id)
            && level_matches(self.sub_location_id, reference.sub_location_id)
    }
}

/// Single-level condition: candidate unset, or exact match.
fn level_matches<T: PartialEq>(candidate: Option<T>, reference: Option<T>) -> bool {
    candidate.is_none() || candidate == reference
}

/// Actor (employee) record as exposed by the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    role: ActorRole,
    status: ActorStatus,
    team_id: Option<TeamId>,
    scope: HierarchyScope,
}

impl Actor {
    /// Creates an actor record.
    #[must_use]
    pub const fn new(
        id: ActorId,
        role: ActorRole,
        status: ActorStatus,
        team_id: Option<TeamId>,
        scope: HierarchyScope,
    ) -> Self {
        Self {
            id,
            role,
            status,
            team_id,
            scope,
        }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the actor role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ActorStatus {
        self.status
    }

    /// Returns the actor's team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    /// Returns the actor's hierarchy scope.
    #[must_use]
    pub const fn scope(&self) -> &HierarchyScope {
        &self.scope
    }

    /// Returns whether the actor participates in visibility and assignment.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ActorStatus::Active)
    }
}
