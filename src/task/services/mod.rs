//! Application services for task lifecycle orchestration.

mod acceptance;
mod lifecycle;

pub use acceptance::{AcceptanceError, AcceptanceResult, AcceptanceService, PendingAcceptance};
pub use lifecycle::{
    BatchCreateOutcome, CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskViewRequest, TASK_CODE_PREFIX, TASK_NUMBER_START,
};
