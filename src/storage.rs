use async_trait::async_trait;
use thiserror::Error;

use crate::employees::repo_types::{Employee, EmployeeChanges, NewEmployee, StatusFilter};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee {0} not found")]
    NotFound(i32),
    /// Unique constraint violation; carries the offending column names.
    #[error("duplicate value for {}", .0.join(", "))]
    Conflict(Vec<String>),
    /// CHECK constraint violation.
    #[error("constraint {0} violated")]
    Constraint(String),
    #[error("invalid stored row: {0}")]
    CorruptRow(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return StoreError::Conflict(vec![conflict_field(&constraint).to_string()]);
            }
            if db_err.is_check_violation() {
                return StoreError::Constraint(constraint);
            }
        }
        StoreError::Database(err)
    }
}

/// Maps a unique constraint name to the API field it guards.
pub fn conflict_field(constraint: &str) -> &str {
    match constraint {
        "employees_emp_id_key" => "emp_id",
        "employees_email_key" => "email",
        other => other,
    }
}

/// Persistence for employee records. Every write touches exactly one row.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All records matching `filter`, ordered by name.
    async fn list(&self, filter: StatusFilter) -> Result<Vec<Employee>, StoreError>;
    async fn get(&self, id: i32) -> Result<Employee, StoreError>;
    async fn create(&self, new: &NewEmployee) -> Result<Employee, StoreError>;
    async fn update(&self, id: i32, changes: &EmployeeChanges) -> Result<Employee, StoreError>;
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

#[cfg(test)]
pub use memory::MemoryEmployeeStore;
