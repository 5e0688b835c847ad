mod postgres;
mod queries;
mod repository;
mod sqlite;

pub use postgres::{create_pool, ensure_schema};
pub use repository::{PgEmployeeRepository, SqlEmployeeRepository, SqliteEmployeeRepository};
pub use sqlite::{create_sqlite_pool, ensure_sqlite_schema, SQLITE_MEMORY_URL};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::employee::{Employee, EmployeeCounts, EmployeeInput, EmployeeSearch, Page};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("email violates the unique constraint")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::DuplicateEmail
            }
            _ => RepositoryError::Database(err),
        }
    }
}

/// Storage for employee rows. Implementations must enforce case-insensitive
/// email uniqueness themselves and report a clash as `DuplicateEmail`; the
/// service-level check is only a pre-check.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Employee>, RepositoryError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError>;

    /// Inserts a row; id and creation time are assigned by storage.
    async fn add(&self, input: &EmployeeInput) -> Result<Employee, RepositoryError>;

    /// Writes back every mutable field. Returns `None` if the row is gone.
    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, RepositoryError>;

    /// Marks the row inactive. Unknown ids are ignored.
    async fn soft_delete(&self, id: i32) -> Result<(), RepositoryError>;

    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, RepositoryError>;

    async fn search_and_paginate(
        &self,
        search: &EmployeeSearch,
    ) -> Result<Page<Employee>, RepositoryError>;

    async fn counts(&self) -> Result<EmployeeCounts, RepositoryError>;
}
