//! Diesel schema for the dual-partition task store.
//!
//! Active and completed tasks live in physically separate tables with the
//! same column shape; the completed table additionally carries the
//! archival audit stamp. Task-number uniqueness spans both tables and is
//! enforced by the case-insensitive unique indexes
//! `idx_active_tasks_number_unique` and `idx_completed_tasks_number_unique`
//! plus the allocator's collision probing.

diesel::table! {
    /// Tasks still moving through the lifecycle.
    active_tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Sequential human-readable task number.
        #[max_length = 50]
        number -> Varchar,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Free-text note.
        note -> Text,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Reminder timestamps as a JSON array.
        reminders -> Jsonb,
        /// Optional attachment reference.
        #[max_length = 1024]
        attachment -> Nullable<Varchar>,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Optional single assignee.
        assignee -> Nullable<Uuid>,
        /// Optional broadcast target team.
        target_team -> Nullable<Uuid>,
        /// Optional broadcast target group.
        target_group -> Nullable<Uuid>,
        /// Creating actor identifier.
        created_by -> Uuid,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Completion timestamp, set when status reaches completed.
        completed_at -> Nullable<Timestamptz>,
        /// Review submission timestamps as a JSON array.
        review_history -> Jsonb,
        /// Lifecycle remarks as a JSON array.
        remarks -> Jsonb,
        /// Actor currently working the task, if any.
        working_actor -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks archived by the atomic completion move.
    completed_tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Sequential human-readable task number.
        #[max_length = 50]
        number -> Varchar,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Free-text note.
        note -> Text,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Reminder timestamps as a JSON array.
        reminders -> Jsonb,
        /// Optional attachment reference.
        #[max_length = 1024]
        attachment -> Nullable<Varchar>,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Optional single assignee.
        assignee -> Nullable<Uuid>,
        /// Optional broadcast target team.
        target_team -> Nullable<Uuid>,
        /// Optional broadcast target group.
        target_group -> Nullable<Uuid>,
        /// Creating actor identifier.
        created_by -> Uuid,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Review submission timestamps as a JSON array.
        review_history -> Jsonb,
        /// Lifecycle remarks as a JSON array.
        remarks -> Jsonb,
        /// Actor currently working the task, if any.
        working_actor -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
        /// Timestamp of the partition move.
        archived_at -> Timestamptz,
    }
}

diesel::table! {
    /// Acceptance records for assigned tasks.
    task_acceptances (id) {
        /// Internal acceptance identifier.
        id -> Uuid,
        /// Task the acceptance belongs to.
        task_id -> Uuid,
        /// Responding actor.
        actor_id -> Uuid,
        /// Decision state.
        #[max_length = 20]
        decision -> Varchar,
        /// Optional response remark.
        remark -> Nullable<Text>,
        /// Response timestamp, if responded.
        responded_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
