//! `PostgreSQL` store implementations for the dual-partition task model.

use super::{
    models::{
        AcceptanceRow, ActiveTaskRow, CompletedTaskRow, NewAcceptanceRow, NewActiveTaskRow,
        NewCompletedTaskRow,
    },
    schema::{active_tasks, completed_tasks, task_acceptances},
};
use crate::allocator::{
    domain::{CodePrefix, EntityKind},
    ports::{CodeDirectory, CodeDirectoryError, CodeDirectoryResult},
};
use crate::directory::domain::{ActorId, GroupId, TeamId};
use crate::task::{
    domain::{
        AcceptanceDecision, AcceptanceId, Partition, PersistedAcceptanceData, PersistedTaskData,
        ProjectId, Task, TaskAcceptance, TaskId, TaskNumber, TaskPriority, TaskQuery, TaskStatus,
    },
    ports::{
        AcceptanceStore, AcceptanceStoreError, AcceptanceStoreResult, LocatedTask, TaskStore,
        TaskStoreError, TaskStoreResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed dual-partition task store.
///
/// Active and completed tasks live in separate tables; the completion move
/// runs as a single transaction so every task has exactly one home at all
/// times. Also implements [`CodeDirectory`] for [`EntityKind::Task`] over
/// the union of both tables, so completed tasks keep their numbers
/// reserved.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn create(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let number = task.number().clone();
        let new_row = to_active_row(task)?;

        self.run_blocking(move |connection| {
            // The active-table unique index cannot see the completed table,
            // so archived numbers are screened here. Within the active table
            // the index still closes the TOCTOU window.
            if number_archived(connection, number.as_str())? {
                return Err(TaskStoreError::DuplicateTaskNumber(number.clone()));
            }

            diesel::insert_into(active_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("idx_active_tasks_number_unique") =>
                    {
                        TaskStoreError::DuplicateTaskNumber(number.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTask(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn create_many(&self, tasks: &[Task]) -> TaskStoreResult<u64> {
        let rows = tasks
            .iter()
            .map(to_active_row)
            .collect::<TaskStoreResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            let rows: Vec<NewActiveTaskRow> = rows
                .into_iter()
                .map(|row| Ok((number_archived(connection, &row.number)?, row)))
                .collect::<TaskStoreResult<Vec<_>>>()?
                .into_iter()
                .filter(|(archived, _)| !archived)
                .map(|(_, row)| row)
                .collect();

            let inserted = diesel::insert_into(active_tasks::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            u64::try_from(inserted).map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<LocatedTask>> {
        self.run_blocking(move |connection| {
            let active = active_tasks::table
                .filter(active_tasks::id.eq(id.into_inner()))
                .select(ActiveTaskRow::as_select())
                .first::<ActiveTaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            if let Some(row) = active {
                return Ok(Some(LocatedTask {
                    task: active_row_to_task(row)?,
                    partition: Partition::Active,
                }));
            }

            let completed = completed_tasks::table
                .filter(completed_tasks::id.eq(id.into_inner()))
                .select(CompletedTaskRow::as_select())
                .first::<CompletedTaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            completed
                .map(|row| {
                    Ok(LocatedTask {
                        task: completed_row_to_task(row)?,
                        partition: Partition::Completed,
                    })
                })
                .transpose()
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let active_row = to_active_row(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                active_tasks::table.filter(active_tasks::id.eq(task_id.into_inner())),
            )
            .set(&active_row)
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            if updated > 0 {
                return Ok(());
            }

            // The completed partition keeps its archival stamp untouched;
            // only the task columns change.
            let updated = diesel::update(
                completed_tasks::table.filter(completed_tasks::id.eq(task_id.into_inner())),
            )
            .set((
                completed_tasks::title.eq(active_row.title),
                completed_tasks::priority.eq(active_row.priority),
                completed_tasks::note.eq(active_row.note),
                completed_tasks::deadline.eq(active_row.deadline),
                completed_tasks::reminders.eq(active_row.reminders),
                completed_tasks::attachment.eq(active_row.attachment),
                completed_tasks::assignee.eq(active_row.assignee),
                completed_tasks::target_team.eq(active_row.target_team),
                completed_tasks::target_group.eq(active_row.target_group),
                completed_tasks::status.eq(active_row.status),
                completed_tasks::completed_at.eq(active_row.completed_at),
                completed_tasks::review_history.eq(active_row.review_history),
                completed_tasks::remarks.eq(active_row.remarks),
                completed_tasks::working_actor.eq(active_row.working_actor),
                completed_tasks::updated_at.eq(active_row.updated_at),
            ))
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            if updated > 0 {
                return Ok(());
            }
            Err(TaskStoreError::NotFound(task_id))
        })
        .await
    }

    async fn complete(&self, task: &Task, archived_at: DateTime<Utc>) -> TaskStoreResult<()> {
        let task_id = task.id();
        let completed_row = to_completed_row(task, archived_at)?;

        self.run_blocking(move |connection| {
            let moved = connection
                .transaction::<_, DieselError, _>(|connection| {
                    // The delete is the race arbiter: a concurrent caller
                    // that already moved the task deletes zero rows, and
                    // the insert is skipped.
                    let removed = diesel::delete(
                        active_tasks::table.filter(active_tasks::id.eq(task_id.into_inner())),
                    )
                    .execute(connection)?;
                    if removed == 0 {
                        return Ok(false);
                    }

                    diesel::insert_into(completed_tasks::table)
                        .values(&completed_row)
                        .execute(connection)?;
                    Ok(true)
                })
                .map_err(TaskStoreError::persistence)?;
            if moved {
                Ok(())
            } else {
                Err(TaskStoreError::NotFound(task_id))
            }
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                active_tasks::table.filter(active_tasks::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            if removed > 0 {
                return Ok(());
            }

            let removed = diesel::delete(
                completed_tasks::table.filter(completed_tasks::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            if removed > 0 {
                return Ok(());
            }
            Err(TaskStoreError::NotFound(id))
        })
        .await
    }

    async fn query(&self, query: &TaskQuery) -> TaskStoreResult<Vec<Task>> {
        // Peer-set predicates evaluate in the domain filter rather than in
        // SQL, so both backends share one definition of visibility.
        let query = query.clone();
        self.run_blocking(move |connection| {
            let tasks = match query.partition() {
                Partition::Active => active_tasks::table
                    .order(active_tasks::created_at.desc())
                    .select(ActiveTaskRow::as_select())
                    .load::<ActiveTaskRow>(connection)
                    .map_err(TaskStoreError::persistence)?
                    .into_iter()
                    .map(active_row_to_task)
                    .collect::<TaskStoreResult<Vec<_>>>()?,
                Partition::Completed => completed_tasks::table
                    .order(completed_tasks::created_at.desc())
                    .select(CompletedTaskRow::as_select())
                    .load::<CompletedTaskRow>(connection)
                    .map_err(TaskStoreError::persistence)?
                    .into_iter()
                    .map(completed_row_to_task)
                    .collect::<TaskStoreResult<Vec<_>>>()?,
            };
            Ok(tasks.into_iter().filter(|task| query.matches(task)).collect())
        })
        .await
    }
}

#[async_trait]
impl CodeDirectory for PostgresTaskStore {
    async fn issued_codes(
        &self,
        entity: EntityKind,
        prefix: &CodePrefix,
    ) -> CodeDirectoryResult<Vec<String>> {
        if entity != EntityKind::Task {
            return Ok(Vec::new());
        }
        let prefix = prefix.clone();
        self.run_blocking(move |connection| {
            let mut numbers = active_tasks::table
                .select(active_tasks::number)
                .load::<String>(connection)
                .map_err(TaskStoreError::persistence)?;
            let archived = completed_tasks::table
                .select(completed_tasks::number)
                .load::<String>(connection)
                .map_err(TaskStoreError::persistence)?;
            numbers.extend(archived);
            numbers.retain(|number| prefix.matches(number));
            Ok(numbers)
        })
        .await
        .map_err(CodeDirectoryError::persistence)
    }

    async fn code_exists(&self, entity: EntityKind, code: &str) -> CodeDirectoryResult<bool> {
        if entity != EntityKind::Task {
            return Ok(false);
        }
        let code = code.to_owned();
        self.run_blocking(move |connection| {
            let in_active = active_tasks::table
                .filter(active_tasks::number.ilike(&code))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskStoreError::persistence)?;
            if in_active > 0 {
                return Ok(true);
            }
            number_archived(connection, &code)
        })
        .await
        .map_err(CodeDirectoryError::persistence)
    }
}

/// `PostgreSQL`-backed acceptance store.
#[derive(Debug, Clone)]
pub struct PostgresAcceptanceStore {
    pool: TaskPgPool,
}

impl PostgresAcceptanceStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AcceptanceStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AcceptanceStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AcceptanceStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AcceptanceStoreError::persistence)?
    }
}

#[async_trait]
impl AcceptanceStore for PostgresAcceptanceStore {
    async fn store(&self, acceptance: &TaskAcceptance) -> AcceptanceStoreResult<()> {
        let task_id = acceptance.task_id();
        let actor_id = acceptance.actor_id();
        let new_row = to_acceptance_row(acceptance);

        self.run_blocking(move |connection| {
            diesel::insert_into(task_acceptances::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AcceptanceStoreError::DuplicateAcceptance { task_id, actor_id }
                    }
                    _ => AcceptanceStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, acceptance: &TaskAcceptance) -> AcceptanceStoreResult<()> {
        let task_id = acceptance.task_id();
        let actor_id = acceptance.actor_id();
        let row = to_acceptance_row(acceptance);

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                task_acceptances::table.filter(task_acceptances::id.eq(row.id)),
            )
            .set(&row)
            .execute(connection)
            .map_err(AcceptanceStoreError::persistence)?;
            if updated == 0 {
                return Err(AcceptanceStoreError::NotFound { task_id, actor_id });
            }
            Ok(())
        })
        .await
    }

    async fn find_by_task_and_actor(
        &self,
        task_id: TaskId,
        actor_id: ActorId,
    ) -> AcceptanceStoreResult<Option<TaskAcceptance>> {
        self.run_blocking(move |connection| {
            let row = task_acceptances::table
                .filter(task_acceptances::task_id.eq(task_id.into_inner()))
                .filter(task_acceptances::actor_id.eq(actor_id.into_inner()))
                .select(AcceptanceRow::as_select())
                .first::<AcceptanceRow>(connection)
                .optional()
                .map_err(AcceptanceStoreError::persistence)?;
            row.map(row_to_acceptance).transpose()
        })
        .await
    }

    async fn find_pending_by_actor(
        &self,
        actor_id: ActorId,
    ) -> AcceptanceStoreResult<Vec<TaskAcceptance>> {
        self.run_blocking(move |connection| {
            task_acceptances::table
                .filter(task_acceptances::actor_id.eq(actor_id.into_inner()))
                .filter(task_acceptances::decision.eq(AcceptanceDecision::Pending.as_str()))
                .order(task_acceptances::created_at.asc())
                .select(AcceptanceRow::as_select())
                .load::<AcceptanceRow>(connection)
                .map_err(AcceptanceStoreError::persistence)?
                .into_iter()
                .map(row_to_acceptance)
                .collect()
        })
        .await
    }
}

fn number_archived(connection: &mut PgConnection, number: &str) -> TaskStoreResult<bool> {
    let hits = completed_tasks::table
        .filter(completed_tasks::number.ilike(number))
        .count()
        .get_result::<i64>(connection)
        .map_err(TaskStoreError::persistence)?;
    Ok(hits > 0)
}

fn to_active_row(task: &Task) -> TaskStoreResult<NewActiveTaskRow> {
    let reminders = serde_json::to_value(task.reminders()).map_err(TaskStoreError::persistence)?;
    let review_history =
        serde_json::to_value(task.review_history()).map_err(TaskStoreError::persistence)?;
    let remarks = serde_json::to_value(task.remarks()).map_err(TaskStoreError::persistence)?;

    Ok(NewActiveTaskRow {
        id: task.id().into_inner(),
        number: task.number().as_str().to_owned(),
        title: task.title().to_owned(),
        priority: task.priority().as_str().to_owned(),
        note: task.note().to_owned(),
        deadline: task.deadline(),
        reminders,
        attachment: task.attachment().map(str::to_owned),
        project_id: task.project_id().into_inner(),
        assignee: task.assignee().map(ActorId::into_inner),
        target_team: task.target_team().map(TeamId::into_inner),
        target_group: task.target_group().map(GroupId::into_inner),
        created_by: task.created_by().into_inner(),
        status: task.status().as_str().to_owned(),
        completed_at: task.completed_at(),
        review_history,
        remarks,
        working_actor: task.working_actor().map(ActorId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_completed_row(task: &Task, archived_at: DateTime<Utc>) -> TaskStoreResult<NewCompletedTaskRow> {
    let row = to_active_row(task)?;
    Ok(NewCompletedTaskRow {
        id: row.id,
        number: row.number,
        title: row.title,
        priority: row.priority,
        note: row.note,
        deadline: row.deadline,
        reminders: row.reminders,
        attachment: row.attachment,
        project_id: row.project_id,
        assignee: row.assignee,
        target_team: row.target_team,
        target_group: row.target_group,
        created_by: row.created_by,
        status: row.status,
        completed_at: row.completed_at,
        review_history: row.review_history,
        remarks: row.remarks,
        working_actor: row.working_actor,
        created_at: row.created_at,
        updated_at: row.updated_at,
        archived_at,
    })
}

fn completed_row_to_task(row: CompletedTaskRow) -> TaskStoreResult<Task> {
    // The archival stamp is partition metadata, not task state; dropping it
    // leaves the shared column shape.
    active_row_to_task(ActiveTaskRow {
        id: row.id,
        number: row.number,
        title: row.title,
        priority: row.priority,
        note: row.note,
        deadline: row.deadline,
        reminders: row.reminders,
        attachment: row.attachment,
        project_id: row.project_id,
        assignee: row.assignee,
        target_team: row.target_team,
        target_group: row.target_group,
        created_by: row.created_by,
        status: row.status,
        completed_at: row.completed_at,
        review_history: row.review_history,
        remarks: row.remarks,
        working_actor: row.working_actor,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn active_row_to_task(row: ActiveTaskRow) -> TaskStoreResult<Task> {
    let number = TaskNumber::new(row.number).map_err(TaskStoreError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskStoreError::persistence)?;
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;
    let reminders = serde_json::from_value(row.reminders).map_err(TaskStoreError::persistence)?;
    let review_history =
        serde_json::from_value(row.review_history).map_err(TaskStoreError::persistence)?;
    let remarks = serde_json::from_value(row.remarks).map_err(TaskStoreError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        number,
        title: row.title,
        priority,
        note: row.note,
        deadline: row.deadline,
        reminders,
        attachment: row.attachment,
        project_id: ProjectId::from_uuid(row.project_id),
        assignee: row.assignee.map(ActorId::from_uuid),
        target_team: row.target_team.map(TeamId::from_uuid),
        target_group: row.target_group.map(GroupId::from_uuid),
        created_by: ActorId::from_uuid(row.created_by),
        status,
        completed_at: row.completed_at,
        review_history,
        remarks,
        working_actor: row.working_actor.map(ActorId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_acceptance_row(acceptance: &TaskAcceptance) -> NewAcceptanceRow {
    NewAcceptanceRow {
        id: acceptance.id().into_inner(),
        task_id: acceptance.task_id().into_inner(),
        actor_id: acceptance.actor_id().into_inner(),
        decision: acceptance.decision().as_str().to_owned(),
        remark: acceptance.remark().map(str::to_owned),
        responded_at: acceptance.responded_at(),
        created_at: acceptance.created_at(),
    }
}

fn row_to_acceptance(row: AcceptanceRow) -> AcceptanceStoreResult<TaskAcceptance> {
    let decision = AcceptanceDecision::try_from(row.decision.as_str())
        .map_err(AcceptanceStoreError::persistence)?;
    let data = PersistedAcceptanceData {
        id: AcceptanceId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        actor_id: ActorId::from_uuid(row.actor_id),
        decision,
        remark: row.remark,
        responded_at: row.responded_at,
        created_at: row.created_at,
    };
    Ok(TaskAcceptance::from_persisted(data))
}
