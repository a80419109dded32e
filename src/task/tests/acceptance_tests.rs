//! Acceptance workflow tests.

#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "Test code uses expect and indexing for assertion clarity"
)]

use crate::directory::domain::ActorId;
use crate::task::{
    adapters::memory::{InMemoryAcceptanceStore, InMemoryTaskStore},
    domain::{
        AcceptanceDecision, AcceptanceResponse, NewTaskData, Task, TaskAcceptance, TaskNumber,
        TaskStatus,
    },
    ports::{AcceptanceStore, TaskStore},
    services::{AcceptanceError, AcceptanceService},
    tests::domain_tests::new_task_data,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Service = AcceptanceService<InMemoryAcceptanceStore, InMemoryTaskStore, DefaultClock>;

struct Harness {
    service: Service,
    acceptances: Arc<InMemoryAcceptanceStore>,
    store: Arc<InMemoryTaskStore>,
}

#[fixture]
fn harness() -> Harness {
    let acceptances = Arc::new(InMemoryAcceptanceStore::new());
    let store = Arc::new(InMemoryTaskStore::new());
    let service = AcceptanceService::new(
        Arc::clone(&acceptances),
        Arc::clone(&store),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        acceptances,
        store,
    }
}

async fn assigned_task(harness: &Harness, assignee: ActorId) -> Task {
    let data = NewTaskData {
        assignee: Some(assignee),
        ..new_task_data("Assigned work")
    };
    let task = Task::new(data, &DefaultClock).expect("valid task data");
    harness
        .store
        .create(&task)
        .await
        .expect("create should succeed");
    let acceptance = TaskAcceptance::new(task.id(), assignee, &DefaultClock);
    harness
        .acceptances
        .store(&acceptance)
        .await
        .expect("acceptance store should succeed");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn responding_settles_the_decision_and_remark(harness: Harness) {
    let assignee = ActorId::new();
    let task = assigned_task(&harness, assignee).await;

    let settled = harness
        .service
        .respond(
            task.id(),
            assignee,
            AcceptanceResponse::Accepted,
            Some("on it".to_owned()),
        )
        .await
        .expect("response should succeed");

    assert_eq!(settled.decision(), AcceptanceDecision::Accepted);
    assert_eq!(settled.remark(), Some("on it"));
    assert!(settled.responded_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_response_is_rejected(harness: Harness) {
    let assignee = ActorId::new();
    let task = assigned_task(&harness, assignee).await;
    harness
        .service
        .respond(task.id(), assignee, AcceptanceResponse::Rejected, None)
        .await
        .expect("first response should succeed");

    let err = harness
        .service
        .respond(task.id(), assignee, AcceptanceResponse::Accepted, None)
        .await
        .expect_err("settled acceptance must not take another response");

    assert!(matches!(err, AcceptanceError::Domain(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn response_without_a_record_reports_not_found(harness: Harness) {
    let assignee = ActorId::new();
    let task = assigned_task(&harness, assignee).await;
    let stranger = ActorId::new();

    let err = harness
        .service
        .respond(task.id(), stranger, AcceptanceResponse::Accepted, None)
        .await
        .expect_err("stranger has no acceptance record");

    assert!(matches!(err, AcceptanceError::NotFound { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_acceptance_leaves_the_task_untouched(harness: Harness) {
    let assignee = ActorId::new();
    let task = assigned_task(&harness, assignee).await;

    harness
        .service
        .respond(
            task.id(),
            assignee,
            AcceptanceResponse::Rejected,
            Some("overloaded this sprint".to_owned()),
        )
        .await
        .expect("response should succeed");

    // An acceptance rejection is a signal, not a lifecycle transition.
    let located = harness
        .store
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(located.task.status(), TaskStatus::Pending);
    assert_eq!(located.task.assignee(), Some(assignee));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_list_joins_tasks_and_skips_deleted_ones(harness: Harness) {
    let assignee = ActorId::new();
    let kept = assigned_task(&harness, assignee).await;
    let doomed = {
        let data = NewTaskData {
            number: TaskNumber::new("T-11002").expect("valid number"),
            assignee: Some(assignee),
            ..new_task_data("Soon deleted")
        };
        let task = Task::new(data, &DefaultClock).expect("valid task data");
        harness
            .store
            .create(&task)
            .await
            .expect("create should succeed");
        harness
            .acceptances
            .store(&TaskAcceptance::new(task.id(), assignee, &DefaultClock))
            .await
            .expect("acceptance store should succeed");
        task
    };
    harness
        .store
        .delete(doomed.id())
        .await
        .expect("delete should succeed");

    let pending = harness
        .service
        .pending_for(assignee)
        .await
        .expect("pending list should resolve");

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].task.id(), kept.id());
    assert!(pending[0].acceptance.is_outstanding());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settled_acceptances_leave_the_pending_list(harness: Harness) {
    let assignee = ActorId::new();
    let task = assigned_task(&harness, assignee).await;
    harness
        .service
        .respond(task.id(), assignee, AcceptanceResponse::Accepted, None)
        .await
        .expect("response should succeed");

    let pending = harness
        .service
        .pending_for(assignee)
        .await
        .expect("pending list should resolve");

    assert!(pending.is_empty());
}
