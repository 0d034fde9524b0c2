use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Employee, EmployeeChanges, EmployeeRow, NewEmployee, StatusFilter};
use crate::storage::{EmployeeStore, StoreError};

const COLUMNS: &str = "id, emp_id, name, email, phone, department, designation, \
                       joining_date, status, address, left_date";

/// Postgres-backed store. Uniqueness and status rules live in table constraints.
#[derive(Clone)]
pub struct PgEmployeeStore {
    db: PgPool,
}

impl PgEmployeeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn list(&self, filter: StatusFilter) -> Result<Vec<Employee>, StoreError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM employees
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY name ASC, id ASC
            "#
        );
        let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(filter.status().map(|s| s.as_str()))
            .fetch_all(&self.db)
            .await?;
        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn get(&self, id: i32) -> Result<Employee, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))?
            .try_into()
    }

    async fn create(&self, new: &NewEmployee) -> Result<Employee, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO employees (emp_id, name, email, phone, department, designation,
                                   joining_date, status, address, left_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(&new.emp_id)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(new.department.as_str())
            .bind(&new.designation)
            .bind(new.joining_date)
            .bind(new.status.as_str())
            .bind(new.address.as_deref())
            .bind(new.left_date)
            .fetch_one(&self.db)
            .await?
            .try_into()
    }

    async fn update(&self, id: i32, changes: &EmployeeChanges) -> Result<Employee, StoreError> {
        let sql = format!(
            r#"
            UPDATE employees SET
                name         = COALESCE($2::text, name),
                email        = COALESCE($3::text, email),
                phone        = COALESCE($4::text, phone),
                department   = COALESCE($5::text, department),
                designation  = COALESCE($6::text, designation),
                joining_date = COALESCE($7::date, joining_date),
                status       = COALESCE($8::text, status),
                address      = CASE WHEN $9::boolean THEN $10::text ELSE address END,
                left_date    = $11::date
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let address = changes.address.as_ref();
        sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.email.as_deref())
            .bind(changes.phone.as_deref())
            .bind(changes.department.map(|d| d.as_str()))
            .bind(changes.designation.as_deref())
            .bind(changes.joining_date)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(address.is_some())
            .bind(address.and_then(|a| a.as_deref()))
            .bind(changes.left_date)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))?
            .try_into()
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
