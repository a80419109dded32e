//! Domain model for actors and hierarchical visibility.

mod actor;
mod error;
mod ids;

pub use actor::{Actor, ActorRole, ActorStatus, HierarchyScope};
pub use error::{ParseActorRoleError, ParseActorStatusError};
pub use ids::{ActorId, CompanyId, GroupId, LocationId, SubLocationId, TeamId};
