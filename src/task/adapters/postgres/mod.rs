//! `PostgreSQL` adapters for the dual-partition task store.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresAcceptanceStore, PostgresTaskStore, TaskPgPool};
