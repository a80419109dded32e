//! Domain type tests: numbers, priorities, queries, and remark ordering.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::allocator::domain::{CodePrefix, SequentialCode};
use crate::directory::domain::{ActorId, TeamId};
use crate::task::domain::{
    NewTaskData, ProjectId, Task, TaskDomainError, TaskFilter, TaskNumber, TaskPriority,
    TaskQuery, TaskStatus,
};
use mockable::DefaultClock;
use std::collections::HashSet;
use rstest::rstest;

/// Builds minimal creation data for a titled task.
pub(crate) fn new_task_data(title: &str) -> NewTaskData {
    NewTaskData {
        number: TaskNumber::new("T-11001").expect("valid number"),
        title: title.to_owned(),
        priority: TaskPriority::default(),
        note: String::new(),
        deadline: None,
        attachment: None,
        project_id: ProjectId::new(),
        assignee: None,
        target_team: None,
        target_group: None,
        created_by: ActorId::new(),
    }
}

#[test]
fn task_number_rejects_blank_input() {
    let err = TaskNumber::new("   ").expect_err("blank number must fail");
    assert!(matches!(err, TaskDomainError::EmptyTaskNumber));
}

#[test]
fn task_number_trims_surrounding_whitespace() {
    let number = TaskNumber::new("  T-11007  ").expect("valid number");
    assert_eq!(number.as_str(), "T-11007");
}

#[test]
fn task_number_from_sequential_code_renders_prefix_and_suffix() {
    let prefix = CodePrefix::new("T-").expect("valid prefix");
    let number = TaskNumber::from(SequentialCode::new(prefix, 11001));
    assert_eq!(number.as_str(), "T-11001");
}

#[rstest]
#[case("low", TaskPriority::Low)]
#[case("Medium", TaskPriority::Medium)]
#[case(" HIGH ", TaskPriority::High)]
#[case("urgent", TaskPriority::Urgent)]
fn priority_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskPriority) {
    assert_eq!(TaskPriority::try_from(raw).expect("valid priority"), expected);
}

#[test]
fn priority_round_trips_through_storage_form() {
    for priority in [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ] {
        assert_eq!(
            TaskPriority::try_from(priority.as_str()).expect("round trip"),
            priority
        );
    }
}

#[test]
fn status_parse_rejects_unknown_value() {
    assert!(TaskStatus::try_from("archived").is_err());
}

fn titled_task(title: &str, note: &str) -> Task {
    let data = NewTaskData {
        note: note.to_owned(),
        ..new_task_data(title)
    };
    Task::new(data, &DefaultClock).expect("valid task data")
}

#[test]
fn query_search_matches_title_number_and_note_case_insensitively() {
    let task = titled_task("Payroll Audit", "include CONTRACTOR invoices");
    let assignee_filter = TaskFilter::CreatedBy {
        actor: task.created_by(),
        status: TaskStatus::Pending,
    };
    let query = |term: &str| {
        TaskQuery::new(TaskStatus::Pending.partition(), assignee_filter.clone())
            .with_search(term)
    };

    assert!(query("payroll").matches(&task));
    assert!(query("t-11001").matches(&task));
    assert!(query("contractor").matches(&task));
    assert!(!query("offboarding").matches(&task));
}

#[test]
fn query_search_is_anded_with_the_filter() {
    let task = titled_task("Payroll Audit", "");
    let other_actor_filter = TaskFilter::CreatedBy {
        actor: ActorId::new(),
        status: TaskStatus::Pending,
    };

    let query = TaskQuery::new(TaskStatus::Pending.partition(), other_actor_filter)
        .with_search("payroll");

    assert!(!query.matches(&task));
}

#[test]
fn assigned_within_filter_matches_peer_assignee_or_target_team() {
    let peer = ActorId::new();
    let team = TeamId::new();
    let mut peers = HashSet::new();
    peers.insert(peer);

    let assigned = {
        let data = NewTaskData {
            assignee: Some(peer),
            ..new_task_data("Assigned to peer")
        };
        Task::new(data, &DefaultClock).expect("valid task data")
    };
    let broadcast = {
        let data = NewTaskData {
            number: TaskNumber::new("T-11002").expect("valid number"),
            target_team: Some(team),
            ..new_task_data("Broadcast to team")
        };
        Task::new(data, &DefaultClock).expect("valid task data")
    };
    let unrelated = titled_task("Unrelated", "");

    let filter = TaskFilter::AssignedWithin {
        peers,
        target_team: Some(team),
        status: None,
    };

    assert!(filter.matches(&assigned));
    assert!(filter.matches(&broadcast));
    assert!(!filter.matches(&unrelated));
}

#[test]
fn remarks_preserve_recording_order() {
    let mut task = titled_task("Ordered remarks", "");
    let actor = task.created_by();

    task.reject(actor, "first", &DefaultClock)
        .expect("pending task may be rejected");
    task.reject(actor, "second", &DefaultClock)
        .expect("rejected task may be re-rejected");

    let texts: Vec<&str> = task.remarks().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}
