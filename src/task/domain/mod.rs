//! Domain model for task lifecycle management.
//!
//! The task domain models the lifecycle state machine, the dual-partition
//! residency rule, view-mode query predicates, and the acceptance overlay
//! while keeping all persistence concerns outside of the domain boundary.

mod acceptance;
mod error;
mod ids;
mod status;
mod task;
mod view;

pub use acceptance::{
    AcceptanceDecision, AcceptanceResponse, PersistedAcceptanceData, TaskAcceptance,
};
pub use error::{
    ParseAcceptanceDecisionError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::{AcceptanceId, ProjectId, TaskId, TaskNumber};
pub use status::{Partition, TaskStatus};
pub use task::{NewTaskData, PersistedTaskData, Task, TaskEdit, TaskPriority, TaskRemark};
pub use view::{TaskFilter, TaskQuery, ViewMode};
