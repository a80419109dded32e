//! In-memory dual-partition store tests.

#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "Test code uses expect and indexing for assertion clarity"
)]

use crate::allocator::domain::{CodePrefix, EntityKind};
use crate::allocator::ports::CodeDirectory;
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{NewTaskData, Partition, Task, TaskFilter, TaskNumber, TaskQuery, TaskStatus},
    ports::{TaskStore, TaskStoreError},
    tests::domain_tests::new_task_data,
};
use crate::directory::domain::ActorId;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

fn numbered_task(number: &str, title: &str) -> Task {
    let data = NewTaskData {
        number: TaskNumber::new(number).expect("valid number"),
        ..new_task_data(title)
    };
    Task::new(data, &DefaultClock).expect("valid task data")
}

fn completed_clone(task: &Task) -> Task {
    let mut completed = task.clone();
    completed
        .finalize_completion(task.created_by(), None, &DefaultClock)
        .expect("task should complete");
    completed
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_found_in_the_active_partition(store: InMemoryTaskStore) {
    let task = numbered_task("T-11001", "Onboarding checklist");
    store.create(&task).await.expect("create should succeed");

    let located = store
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");

    assert_eq!(located.partition, Partition::Active);
    assert_eq!(located.task, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_moves_the_task_to_exactly_one_partition(store: InMemoryTaskStore) {
    let task = numbered_task("T-11001", "Benefits enrolment");
    store.create(&task).await.expect("create should succeed");
    let completed = completed_clone(&task);

    let archived_at = DefaultClock.utc();
    store
        .complete(&completed, archived_at)
        .await
        .expect("completion move should succeed");

    let located = store
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(located.partition, Partition::Completed);
    assert_eq!(located.task.status(), TaskStatus::Completed);
    assert_eq!(
        store
            .archived_at(task.id())
            .expect("stamp lookup should succeed"),
        Some(archived_at)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_of_an_already_moved_task_reports_not_found(store: InMemoryTaskStore) {
    let task = numbered_task("T-11001", "Exit interview");
    store.create(&task).await.expect("create should succeed");
    let completed = completed_clone(&task);
    store
        .complete(&completed, DefaultClock.utc())
        .await
        .expect("first move should succeed");

    let err = store
        .complete(&completed, DefaultClock.utc())
        .await
        .expect_err("second move must fail");

    assert!(matches!(err, TaskStoreError::NotFound(id) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_number_is_rejected_across_partitions(store: InMemoryTaskStore) {
    let task = numbered_task("T-11001", "Headcount report");
    store.create(&task).await.expect("create should succeed");
    let completed = completed_clone(&task);
    store
        .complete(&completed, DefaultClock.utc())
        .await
        .expect("move should succeed");

    // The number stays reserved even though the task left the active
    // partition.
    let rival = numbered_task("t-11001", "Another headcount report");
    let err = store
        .create(&rival)
        .await
        .expect_err("archived number must stay reserved");

    assert!(matches!(err, TaskStoreError::DuplicateTaskNumber(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_many_skips_duplicates_and_reports_inserted_count(store: InMemoryTaskStore) {
    let existing = numbered_task("T-11001", "Already present");
    store.create(&existing).await.expect("create should succeed");

    let batch = vec![
        numbered_task("T-11001", "Duplicate number"),
        numbered_task("T-11002", "Fresh"),
        numbered_task("T-11003", "Also fresh"),
    ];
    let inserted = store
        .create_many(&batch)
        .await
        .expect("bulk insert should succeed");

    assert_eq!(inserted, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_from_whichever_partition_holds_the_task(store: InMemoryTaskStore) {
    let active = numbered_task("T-11001", "Active");
    let archived = numbered_task("T-11002", "Archived");
    store.create(&active).await.expect("create should succeed");
    store.create(&archived).await.expect("create should succeed");
    let completed = completed_clone(&archived);
    store
        .complete(&completed, DefaultClock.utc())
        .await
        .expect("move should succeed");

    store
        .delete(active.id())
        .await
        .expect("active delete should succeed");
    store
        .delete(archived.id())
        .await
        .expect("completed delete should succeed");

    assert!(store
        .find_by_id(active.id())
        .await
        .expect("lookup should succeed")
        .is_none());
    assert!(store
        .find_by_id(archived.id())
        .await
        .expect("lookup should succeed")
        .is_none());
    let err = store
        .delete(active.id())
        .await
        .expect_err("double delete must fail");
    assert!(matches!(err, TaskStoreError::NotFound(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_reads_only_the_requested_partition(store: InMemoryTaskStore) {
    let creator = ActorId::new();
    let open = {
        let data = NewTaskData {
            created_by: creator,
            ..new_task_data("Open item")
        };
        Task::new(data, &DefaultClock).expect("valid task data")
    };
    let done = {
        let data = NewTaskData {
            number: TaskNumber::new("T-11002").expect("valid number"),
            created_by: creator,
            ..new_task_data("Done item")
        };
        Task::new(data, &DefaultClock).expect("valid task data")
    };
    store.create(&open).await.expect("create should succeed");
    store.create(&done).await.expect("create should succeed");
    let completed = completed_clone(&done);
    store
        .complete(&completed, DefaultClock.utc())
        .await
        .expect("move should succeed");

    let active_filter = TaskFilter::CreatedBy {
        actor: creator,
        status: TaskStatus::Pending,
    };
    let active = store
        .query(&TaskQuery::new(Partition::Active, active_filter))
        .await
        .expect("query should succeed");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].number().as_str(), "T-11001");

    let completed_filter = TaskFilter::CreatedBy {
        actor: creator,
        status: TaskStatus::Completed,
    };
    let completed = store
        .query(&TaskQuery::new(Partition::Completed, completed_filter))
        .await
        .expect("query should succeed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].number().as_str(), "T-11002");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn code_directory_spans_both_partitions(store: InMemoryTaskStore) {
    let active = numbered_task("T-11001", "Active");
    let archived = numbered_task("T-11002", "Archived");
    store.create(&active).await.expect("create should succeed");
    store.create(&archived).await.expect("create should succeed");
    let completed = completed_clone(&archived);
    store
        .complete(&completed, DefaultClock.utc())
        .await
        .expect("move should succeed");

    let prefix = CodePrefix::new("T-").expect("valid prefix");
    let mut codes = store
        .issued_codes(EntityKind::Task, &prefix)
        .await
        .expect("directory scan should succeed");
    codes.sort();

    assert_eq!(codes, vec!["T-11001".to_owned(), "T-11002".to_owned()]);
    assert!(store
        .code_exists(EntityKind::Task, "t-11002")
        .await
        .expect("existence check should succeed"));
    assert!(!store
        .code_exists(EntityKind::Task, "T-11003")
        .await
        .expect("existence check should succeed"));
    assert!(store
        .issued_codes(EntityKind::Company, &prefix)
        .await
        .expect("directory scan should succeed")
        .is_empty());
}
