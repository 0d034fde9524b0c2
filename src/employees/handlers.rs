use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::dto::{CreateEmployeeRequest, MessageResponse, StatusQuery, UpdateEmployeeRequest};
use super::repo_types::Employee;
use super::{report, services};
use crate::{error::ApiError, state::AppState};

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/report/generate", get(generate_report))
        .route(
            "/employees/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let Query(q) = query?;
    let employees = state
        .store
        .list(q.status)
        .await
        .map_err(|e| ApiError::from_store("Failed to fetch employees", e))?;
    Ok(Json(employees))
}

#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let employee = state
        .store
        .get(id)
        .await
        .map_err(|e| ApiError::from_store("Failed to fetch employee", e))?;
    Ok(Json(employee))
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(req) = payload?;
    let today = OffsetDateTime::now_utc().date();
    let employee = services::create_employee(state.store.as_ref(), req, today).await?;
    info!(id = employee.id, emp_id = %employee.emp_id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

#[instrument(skip(state, payload))]
pub async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let employee = services::update_employee(state.store.as_ref(), id, req).await?;
    info!(id, "employee updated");
    Ok(Json(employee))
}

#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state
        .store
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store("Failed to delete employee", e))?;
    info!(id, "employee deleted");
    Ok(Json(MessageResponse {
        message: "Employee deleted successfully",
    }))
}

/// GET /employees/report/generate?status=All|Active|Left → CSV attachment
#[instrument(skip(state))]
pub async fn generate_report(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(q) = query?;
    let employees = state
        .store
        .list(q.status)
        .await
        .map_err(|e| ApiError::from_store("Failed to generate report", e))?;

    let csv = report::render_csv(&employees, state.config.report_date_style).map_err(|e| {
        ApiError::Internal {
            context: "Failed to generate report",
            source: e,
        }
    })?;
    let filename = report::report_filename(q.status, OffsetDateTime::now_utc().date())
        .map_err(|e| ApiError::Internal {
            context: "Failed to generate report",
            source: e.into(),
        })?;
    info!(rows = employees.len(), %filename, "report generated");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        csv,
    ))
}
