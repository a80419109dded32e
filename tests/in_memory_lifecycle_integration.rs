//! Behavioural integration tests for the in-memory task lifecycle stack.
//!
//! These tests wire the lifecycle service to the in-memory adapters and
//! drive realistic end-to-end flows: number allocation, assignment
//! acceptance, review, rejection and rework, completion, and partitioned
//! views.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use foreman::directory::{
    adapters::memory::InMemoryActorDirectory,
    domain::{Actor, ActorId, ActorRole, ActorStatus, GroupId, HierarchyScope, TeamId},
};
use foreman::task::{
    adapters::memory::{
        InMemoryAcceptanceStore, InMemoryTaskStore, PermitAllAccessControl, RecordingNotifier,
    },
    domain::{AcceptanceResponse, Partition, ProjectId, TaskEdit, TaskStatus, ViewMode},
    ports::TaskStore,
    services::{
        AcceptanceService, CreateTaskRequest, TaskLifecycleService, TaskViewRequest,
    },
};
use mockable::DefaultClock;
use std::sync::Arc;

type Lifecycle = TaskLifecycleService<
    InMemoryTaskStore,
    InMemoryTaskStore,
    InMemoryActorDirectory,
    InMemoryAcceptanceStore,
    RecordingNotifier,
    PermitAllAccessControl,
    DefaultClock,
>;

struct Stack {
    lifecycle: Lifecycle,
    acceptance: AcceptanceService<InMemoryAcceptanceStore, InMemoryTaskStore, DefaultClock>,
    store: Arc<InMemoryTaskStore>,
    directory: Arc<InMemoryActorDirectory>,
}

fn stack() -> Stack {
    let store = Arc::new(InMemoryTaskStore::new());
    let directory = Arc::new(InMemoryActorDirectory::new());
    let acceptances = Arc::new(InMemoryAcceptanceStore::new());
    let clock = Arc::new(DefaultClock);

    let lifecycle = TaskLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&directory),
        Arc::clone(&acceptances),
        Arc::new(RecordingNotifier::new()),
        Arc::new(PermitAllAccessControl::new()),
        Arc::clone(&clock),
    );
    let acceptance = AcceptanceService::new(acceptances, Arc::clone(&store), clock);
    Stack {
        lifecycle,
        acceptance,
        store,
        directory,
    }
}

fn register(stack: &Stack, role: ActorRole, group: Option<GroupId>, team: Option<TeamId>) -> ActorId {
    let id = ActorId::new();
    let scope = HierarchyScope {
        group_id: group,
        ..HierarchyScope::unscoped()
    };
    stack
        .directory
        .upsert(Actor::new(id, role, ActorStatus::Active, team, scope))
        .expect("upsert should succeed");
    id
}

#[tokio::test(flavor = "multi_thread")]
async fn assigned_task_flows_from_acceptance_to_completion() {
    let stack = stack();
    let group = GroupId::new();
    let manager = register(&stack, ActorRole::Manager, Some(group), None);
    let worker = register(&stack, ActorRole::Employee, Some(group), None);

    // Manager assigns work; the number comes from the allocator.
    let task = stack
        .lifecycle
        .create(
            manager,
            CreateTaskRequest::new(ProjectId::new(), "Prepare payroll run")
                .with_note("October cycle")
                .with_assignee(worker),
        )
        .await
        .expect("create should succeed");
    assert_eq!(task.number().as_str(), "T-11001");

    // The worker sees and accepts the outstanding acceptance.
    let pending = stack
        .acceptance
        .pending_for(worker)
        .await
        .expect("pending list should resolve");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].task.id(), task.id());

    stack
        .acceptance
        .respond(task.id(), worker, AcceptanceResponse::Accepted, None)
        .await
        .expect("acceptance should settle");

    // Work gets submitted, rejected once, reworked, and completed.
    stack
        .lifecycle
        .submit_for_review(worker, task.id(), "first pass done")
        .await
        .expect("review submission should succeed");
    stack
        .lifecycle
        .reject_task(manager, task.id(), "bonus column missing")
        .await
        .expect("rejection should succeed");
    stack
        .lifecycle
        .submit_for_review(worker, task.id(), "bonus column added")
        .await
        .expect_err("rejected tasks re-enter review via pending");
    let reopened = stack
        .lifecycle
        .update(
            manager,
            task.id(),
            TaskEdit {
                status: Some(TaskStatus::Pending),
                ..TaskEdit::default()
            },
        )
        .await
        .expect("reopening should succeed");
    assert_eq!(reopened.status(), TaskStatus::Pending);
    stack
        .lifecycle
        .submit_for_review(worker, task.id(), "bonus column added")
        .await
        .expect("second review submission should succeed");
    let done = stack
        .lifecycle
        .finalize_completion(manager, task.id(), Some("approved".to_owned()))
        .await
        .expect("finalization should succeed");

    assert_eq!(done.status(), TaskStatus::Completed);
    assert_eq!(done.review_history().len(), 2);
    assert!(done.completed_at().is_some());

    // The task now lives in exactly the completed partition with its
    // archival stamp.
    let located = stack
        .store
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(located.partition, Partition::Completed);
    assert!(stack
        .store
        .archived_at(task.id())
        .expect("stamp lookup should succeed")
        .is_some());

    // Completed views see it; pending views no longer do.
    let completed_view = stack
        .lifecycle
        .find_all(TaskViewRequest::new(worker, ViewMode::MyCompleted))
        .await
        .expect("view should resolve");
    let pending_view = stack
        .lifecycle
        .find_all(TaskViewRequest::new(worker, ViewMode::MyPending))
        .await
        .expect("view should resolve");
    assert_eq!(completed_view.len(), 1);
    assert!(pending_view.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn numbers_continue_across_completion_and_survive_team_views() {
    let stack = stack();
    let group = GroupId::new();
    let team = TeamId::new();
    let lead = register(&stack, ActorRole::Manager, Some(group), Some(team));
    let member = register(&stack, ActorRole::Employee, Some(group), Some(team));

    let first = stack
        .lifecycle
        .create(
            lead,
            CreateTaskRequest::new(ProjectId::new(), "Archive me").with_assignee(member),
        )
        .await
        .expect("create should succeed");
    stack
        .lifecycle
        .finalize_completion(lead, first.id(), None)
        .await
        .expect("finalization should succeed");

    // The archived task keeps T-11001 reserved; allocation moves on.
    let second = stack
        .lifecycle
        .create(
            lead,
            CreateTaskRequest::new(ProjectId::new(), "Fresh work").with_target_team(team),
        )
        .await
        .expect("create should succeed");
    assert_eq!(second.number().as_str(), "T-11002");

    let team_pending = stack
        .lifecycle
        .find_all(TaskViewRequest::new(member, ViewMode::TeamPending))
        .await
        .expect("view should resolve");
    let team_completed = stack
        .lifecycle
        .find_all(TaskViewRequest::new(member, ViewMode::TeamCompleted))
        .await
        .expect("view should resolve");

    assert_eq!(team_pending.len(), 1);
    assert_eq!(team_pending[0].id(), second.id());
    assert_eq!(team_completed.len(), 1);
    assert_eq!(team_completed[0].id(), first.id());
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_import_allocates_a_contiguous_block() {
    let stack = stack();
    let admin = register(&stack, ActorRole::Admin, None, None);

    let requests = (1..=20)
        .map(|i| CreateTaskRequest::new(ProjectId::new(), format!("Imported item {i}")))
        .collect::<Vec<_>>();
    let outcome = stack
        .lifecycle
        .create_batch(admin, requests)
        .await
        .expect("batch create should succeed");

    assert_eq!(outcome.inserted, 20);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.tasks[0].number().as_str(), "T-11001");
    assert_eq!(outcome.tasks[19].number().as_str(), "T-11020");

    // A follow-up single create continues after the block.
    let next = stack
        .lifecycle
        .create(admin, CreateTaskRequest::new(ProjectId::new(), "Next up"))
        .await
        .expect("create should succeed");
    assert_eq!(next.number().as_str(), "T-11021");
}
