//! Orchestration of task creation, lifecycle transitions, and views.

use crate::allocator::{
    domain::{CodePrefix, EntityKind},
    ports::CodeDirectory,
    services::{AllocatorError, CodeAllocator},
};
use crate::directory::{
    domain::{Actor, ActorId, GroupId, TeamId},
    ports::{ActorDirectory, ActorDirectoryError},
    services::VisibilityResolver,
};
use crate::task::{
    domain::{
        NewTaskData, ProjectId, Task, TaskAcceptance, TaskDomainError, TaskEdit, TaskFilter,
        TaskId, TaskNumber, TaskPriority, TaskQuery, TaskStatus, ViewMode,
    },
    ports::{
        AccessControl, AccessControlError, AcceptanceStore, AcceptanceStoreError, LocatedTask,
        Notification, NotificationKind, Notifier, TaskAction, TaskStore, TaskStoreError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Prefix of the task sequential code space.
pub const TASK_CODE_PREFIX: &str = "T-";

/// First numeric suffix issued when no task codes exist yet.
pub const TASK_NUMBER_START: u64 = 11001;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    priority: TaskPriority,
    note: String,
    deadline: Option<DateTime<Utc>>,
    attachment: Option<String>,
    assignee: Option<ActorId>,
    target_team: Option<TeamId>,
    target_group: Option<GroupId>,
    number: Option<TaskNumber>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            priority: TaskPriority::default(),
            note: String::new(),
            deadline: None,
            attachment: None,
            assignee: None,
            target_team: None,
            target_group: None,
            number: None,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the free-text note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets an attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    /// Sets a single assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: ActorId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets a broadcast target team.
    #[must_use]
    pub const fn with_target_team(mut self, team: TeamId) -> Self {
        self.target_team = Some(team);
        self
    }

    /// Sets a broadcast target group.
    #[must_use]
    pub const fn with_target_group(mut self, group: GroupId) -> Self {
        self.target_group = Some(group);
        self
    }

    /// Supplies an externally assigned task number, bypassing allocation.
    #[must_use]
    pub fn with_number(mut self, number: TaskNumber) -> Self {
        self.number = Some(number);
        self
    }
}

/// Request payload for a partitioned task view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskViewRequest {
    actor: ActorId,
    mode: ViewMode,
    search: Option<String>,
}

impl TaskViewRequest {
    /// Creates a view request for an actor and view mode.
    #[must_use]
    pub const fn new(actor: ActorId, mode: ViewMode) -> Self {
        Self {
            actor,
            mode,
            search: None,
        }
    }

    /// Adds a free-text search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// Outcome of a bulk-create call.
#[derive(Debug, Clone)]
pub struct BatchCreateOutcome {
    /// Tasks submitted for insertion, in request order.
    pub tasks: Vec<Task>,
    /// Number of rows actually persisted.
    pub inserted: u64,
    /// Number of rows skipped as duplicates of concurrent writes.
    pub skipped: u64,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Sequential number allocation failed.
    #[error(transparent)]
    Allocator(#[from] AllocatorError),
    /// Actor directory lookup failed.
    #[error(transparent)]
    Directory(#[from] ActorDirectoryError),
    /// Acceptance store operation failed.
    #[error(transparent)]
    Acceptance(#[from] AcceptanceStoreError),
    /// Access-control evaluation failed.
    #[error(transparent)]
    Access(#[from] AccessControlError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The acting actor is unknown to the directory.
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),
    /// The acting actor may not perform the operation.
    #[error("actor {actor} is not authorized to {action} task {task_id:?}")]
    Unauthorized {
        /// The denied actor.
        actor: ActorId,
        /// The denied action.
        action: TaskAction,
        /// The targeted task, when the action targets one.
        task_id: Option<TaskId>,
    },
    /// A reminder was requested for a task with no assignee.
    #[error("task {0} has no assignee to remind")]
    MissingAssignee(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Coordinates the dual-partition store, the sequential number allocator,
/// the hierarchy-aware visibility resolver, and the acceptance workflow.
/// Notification dispatch is best-effort and never fails a lifecycle
/// operation.
#[derive(Clone)]
pub struct TaskLifecycleService<S, G, D, P, N, A, K>
where
    S: TaskStore,
    G: CodeDirectory,
    D: ActorDirectory,
    P: AcceptanceStore,
    N: Notifier,
    A: AccessControl,
    K: Clock + Send + Sync,
{
    store: Arc<S>,
    allocator: CodeAllocator<G>,
    visibility: VisibilityResolver<D>,
    acceptances: Arc<P>,
    notifier: Arc<N>,
    access: Arc<A>,
    clock: Arc<K>,
}

impl<S, G, D, P, N, A, K> TaskLifecycleService<S, G, D, P, N, A, K>
where
    S: TaskStore,
    G: CodeDirectory,
    D: ActorDirectory,
    P: AcceptanceStore,
    N: Notifier,
    A: AccessControl,
    K: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        code_directory: Arc<G>,
        actor_directory: Arc<D>,
        acceptances: Arc<P>,
        notifier: Arc<N>,
        access: Arc<A>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            store,
            allocator: CodeAllocator::new(code_directory),
            visibility: VisibilityResolver::new(actor_directory),
            acceptances,
            notifier,
            access,
            clock,
        }
    }

    /// Creates a task, allocating its sequential number unless the request
    /// supplies one.
    ///
    /// Assigned tasks additionally open an outstanding acceptance record
    /// and dispatch a best-effort assignment notification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ActorNotFound`] for an unknown acting
    /// actor, [`TaskLifecycleError::Unauthorized`] when access control
    /// denies creation, and store, allocator, or domain errors otherwise.
    pub async fn create(
        &self,
        actor_id: ActorId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.require_actor(actor_id).await?;
        self.authorize(&actor, TaskAction::Create, None).await?;

        let number = match request.number {
            Some(number) => number,
            None => {
                let prefix = task_prefix()?;
                let code = self
                    .allocator
                    .allocate(EntityKind::Task, &prefix, TASK_NUMBER_START)
                    .await?;
                TaskNumber::from(code)
            }
        };

        let task = Task::new(
            NewTaskData {
                number,
                title: request.title,
                priority: request.priority,
                note: request.note,
                deadline: request.deadline,
                attachment: request.attachment,
                project_id: request.project_id,
                assignee: request.assignee,
                target_team: request.target_team,
                target_group: request.target_group,
                created_by: actor_id,
            },
            &*self.clock,
        )?;
        self.store.create(&task).await?;

        if let Some(assignee) = task.assignee() {
            let acceptance = TaskAcceptance::new(task.id(), assignee, &*self.clock);
            self.acceptances.store(&acceptance).await?;
            self.dispatch(assignee, assignment_notification(&task)).await;
        }
        Ok(task)
    }

    /// Creates many tasks in one store round trip.
    ///
    /// Numbers come from a single batch allocation; duplicates raced in by
    /// concurrent writers are skipped rather than failing the whole batch,
    /// and the outcome reports how many rows were actually persisted.
    /// The bulk path opens no acceptance records and sends no
    /// notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ActorNotFound`],
    /// [`TaskLifecycleError::Unauthorized`], or store, allocator, and
    /// domain errors.
    pub async fn create_batch(
        &self,
        actor_id: ActorId,
        requests: Vec<CreateTaskRequest>,
    ) -> TaskLifecycleResult<BatchCreateOutcome> {
        let actor = self.require_actor(actor_id).await?;
        self.authorize(&actor, TaskAction::Create, None).await?;

        let wanted = requests.iter().filter(|r| r.number.is_none()).count();
        let prefix = task_prefix()?;
        let mut allocated = self
            .allocator
            .allocate_batch(EntityKind::Task, &prefix, TASK_NUMBER_START, wanted)
            .await?
            .into_iter();

        let mut tasks = Vec::with_capacity(requests.len());
        for request in requests {
            let number = match request.number {
                Some(number) => number,
                // allocate_batch returned exactly `wanted` codes.
                None => match allocated.next() {
                    Some(code) => TaskNumber::from(code),
                    None => {
                        return Err(AllocatorError::Exhausted {
                            entity: EntityKind::Task,
                            prefix: prefix.clone(),
                            attempts: 0,
                        }
                        .into());
                    }
                },
            };
            tasks.push(Task::new(
                NewTaskData {
                    number,
                    title: request.title,
                    priority: request.priority,
                    note: request.note,
                    deadline: request.deadline,
                    attachment: request.attachment,
                    project_id: request.project_id,
                    assignee: request.assignee,
                    target_team: request.target_team,
                    target_group: request.target_group,
                    created_by: actor_id,
                },
                &*self.clock,
            )?);
        }

        let inserted = self.store.create_many(&tasks).await?;
        let total = u64::try_from(tasks.len()).unwrap_or(u64::MAX);
        let skipped = total.saturating_sub(inserted);
        Ok(BatchCreateOutcome {
            tasks,
            inserted,
            skipped,
        })
    }

    /// Submits a pending task for review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] for an invalid transition, or a
    /// store error.
    pub async fn submit_for_review(
        &self,
        actor_id: ActorId,
        task_id: TaskId,
        remark: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?.task;
        task.submit_for_review(actor_id, remark, &*self.clock)?;
        self.store.update(&task).await?;
        Ok(task)
    }

    /// Finalizes a task as completed, atomically moving it to the
    /// completed partition.
    ///
    /// Under concurrent finalization exactly one caller wins; the losers
    /// observe either an invalid transition or a store-level not-found from
    /// the partition move.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] when the task cannot complete, or a
    /// store error.
    pub async fn finalize_completion(
        &self,
        actor_id: ActorId,
        task_id: TaskId,
        remark: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?.task;
        task.finalize_completion(actor_id, remark, &*self.clock)?;
        self.store.complete(&task, self.clock.utc()).await?;
        Ok(task)
    }

    /// Rejects a task, keeping it in the active partition for rework.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] when the task is already completed,
    /// or a store error.
    pub async fn reject_task(
        &self,
        actor_id: ActorId,
        task_id: TaskId,
        remark: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?.task;
        task.reject(actor_id, remark, &*self.clock)?;
        self.store.update(&task).await?;
        Ok(task)
    }

    /// Records a reminder against an assigned task and notifies the
    /// assignee best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ActorNotFound`] for an unknown acting
    /// actor, [`TaskLifecycleError::MissingAssignee`] when the task has no
    /// assignee, [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// a store error.
    pub async fn send_reminder(
        &self,
        actor_id: ActorId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        self.require_actor(actor_id).await?;
        let mut task = self.require_task(task_id).await?.task;
        let Some(assignee) = task.assignee() else {
            return Err(TaskLifecycleError::MissingAssignee(task_id));
        };
        task.record_reminder(&*self.clock);
        self.store.update(&task).await?;
        self.dispatch(assignee, reminder_notification(&task)).await;
        Ok(task)
    }

    /// Applies a field patch to a task.
    ///
    /// Changing a broadcast target counts as reassignment for access
    /// control. An edit that moves the status to completed routes through
    /// the atomic partition move instead of an in-place update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ActorNotFound`],
    /// [`TaskLifecycleError::Unauthorized`],
    /// [`TaskLifecycleError::NotFound`], domain validation errors, or a
    /// store error.
    pub async fn update(
        &self,
        actor_id: ActorId,
        task_id: TaskId,
        edit: TaskEdit,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.require_actor(actor_id).await?;
        let action = if edit.target_team.is_some() || edit.target_group.is_some() {
            TaskAction::Reassign
        } else {
            TaskAction::Edit
        };
        self.authorize(&actor, action, Some(task_id)).await?;

        let mut task = self.require_task(task_id).await?.task;
        let completing =
            edit.status == Some(TaskStatus::Completed) && task.status() != TaskStatus::Completed;
        task.apply_edit(edit, &*self.clock)?;

        if completing {
            self.store.complete(&task, self.clock.utc()).await?;
        } else {
            self.store.update(&task).await?;
        }
        Ok(task)
    }

    /// Hard-deletes a task from whichever partition holds it.
    ///
    /// Non-privileged actors may delete only tasks they created.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ActorNotFound`],
    /// [`TaskLifecycleError::Unauthorized`],
    /// [`TaskLifecycleError::NotFound`], or a store error.
    pub async fn delete(&self, actor_id: ActorId, task_id: TaskId) -> TaskLifecycleResult<()> {
        let actor = self.require_actor(actor_id).await?;
        let task = self.require_task(task_id).await?.task;
        if !actor.role().is_privileged() && task.created_by() != actor_id {
            return Err(TaskLifecycleError::Unauthorized {
                actor: actor_id,
                action: TaskAction::Delete,
                task_id: Some(task_id),
            });
        }
        self.authorize(&actor, TaskAction::Delete, Some(task_id))
            .await?;
        self.store.delete(task_id).await?;
        Ok(())
    }

    /// Looks a task up by id across both partitions.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self
            .store
            .find_by_id(task_id)
            .await?
            .map(|located| located.task))
    }

    /// Resolves a partitioned task view for an actor.
    ///
    /// Team-scoped views for an actor the directory no longer knows
    /// resolve to the empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns directory or store errors.
    pub async fn find_all(&self, request: TaskViewRequest) -> TaskLifecycleResult<Vec<Task>> {
        let TaskViewRequest {
            actor,
            mode,
            search,
        } = request;

        let filter = match mode {
            // The pending views constrain status: the active partition
            // also holds Review and Rejected tasks, which are not theirs
            // to show. The completed views read a partition that only
            // ever holds completed tasks, so no constraint is needed.
            ViewMode::MyPending | ViewMode::MyCompleted => TaskFilter::AssignedTo {
                actor,
                status: (mode == ViewMode::MyPending).then_some(TaskStatus::Pending),
            },
            ViewMode::TeamPending | ViewMode::TeamCompleted => {
                let Some(reference) = self.visibility.directory().find_by_id(actor).await? else {
                    return Ok(Vec::new());
                };
                TaskFilter::AssignedWithin {
                    peers: self.visibility.peer_ids(actor).await?,
                    target_team: reference.team_id(),
                    status: (mode == ViewMode::TeamPending).then_some(TaskStatus::Pending),
                }
            }
            ViewMode::ReviewPendingByMe => TaskFilter::CreatedBy {
                actor,
                status: TaskStatus::Review,
            },
            ViewMode::ReviewPendingByTeam => {
                if self.visibility.directory().find_by_id(actor).await?.is_none() {
                    return Ok(Vec::new());
                }
                TaskFilter::CreatedWithin {
                    peers: self.visibility.peer_ids(actor).await?,
                    status: TaskStatus::Review,
                }
            }
        };

        let mut query = TaskQuery::new(mode.partition(), filter);
        if let Some(term) = search {
            query = query.with_search(term);
        }
        Ok(self.store.query(&query).await?)
    }

    async fn require_actor(&self, actor_id: ActorId) -> TaskLifecycleResult<Actor> {
        self.visibility
            .directory()
            .find_by_id(actor_id)
            .await?
            .ok_or(TaskLifecycleError::ActorNotFound(actor_id))
    }

    async fn require_task(
        &self,
        task_id: TaskId,
    ) -> TaskLifecycleResult<LocatedTask> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    async fn authorize(
        &self,
        actor: &Actor,
        action: TaskAction,
        task_id: Option<TaskId>,
    ) -> TaskLifecycleResult<()> {
        if self.access.allows(actor, action).await? {
            return Ok(());
        }
        Err(TaskLifecycleError::Unauthorized {
            actor: actor.id(),
            action,
            task_id,
        })
    }

    /// Best-effort notification dispatch: failures are logged, never
    /// propagated.
    async fn dispatch(&self, recipient: ActorId, notification: Notification) {
        if let Err(err) = self.notifier.notify(recipient, notification).await {
            tracing::warn!(recipient = %recipient, error = %err, "notification dispatch failed");
        }
    }
}

fn task_prefix() -> Result<CodePrefix, AllocatorError> {
    Ok(CodePrefix::new(TASK_CODE_PREFIX)?)
}

fn assignment_notification(task: &Task) -> Notification {
    Notification {
        title: format!("Task {} assigned", task.number()),
        description: task.title().to_owned(),
        kind: NotificationKind::TaskAssigned,
        metadata: json!({
            "task_id": task.id().to_string(),
            "number": task.number().as_str(),
        }),
    }
}

fn reminder_notification(task: &Task) -> Notification {
    Notification {
        title: format!("Reminder: task {}", task.number()),
        description: task.title().to_owned(),
        kind: NotificationKind::TaskReminder,
        metadata: json!({
            "task_id": task.id().to_string(),
            "number": task.number().as_str(),
            "reminder_count": task.reminders().len(),
        }),
    }
}
