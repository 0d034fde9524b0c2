use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::storage::StoreError;

const CONFLICT_MESSAGE: &str = "Employee with this email or ID already exists";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Outcome of a failed request, mapped onto a status code and JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("duplicate value for {}", .0.join(", "))]
    Conflict(Vec<String>),
    #[error("Employee not found")]
    NotFound,
    /// Details stay in the server log; the caller only sees `context`.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn from_store(context: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Conflict(fields) => ApiError::Conflict(fields),
            StoreError::Constraint(name) => ApiError::Validation(constraint_message(&name)),
            other => ApiError::Storage {
                context,
                source: other,
            },
        }
    }
}

fn constraint_message(constraint: &str) -> String {
    match constraint {
        "employees_left_date_matches_status" => {
            "left_date must be set when status is Left and empty when Active".into()
        }
        "employees_required_not_blank" => "Required fields must not be empty".into(),
        other => format!("Value rejected by constraint {}", other),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Conflict(fields) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": CONFLICT_MESSAGE, "field": fields })),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Employee not found" })),
            )
                .into_response(),
            ApiError::Storage { context, source } => {
                error!(error = %source, context, "storage failure");
                internal(context)
            }
            ApiError::Internal { context, source } => {
                error!(error = ?source, context, "internal failure");
                internal(context)
            }
        }
    }
}

fn internal(context: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": context, "message": INTERNAL_MESSAGE })),
    )
        .into_response()
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        ApiError::Validation(rej.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::Validation("Invalid employee id".into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        ApiError::Validation("status must be one of All, Active, Left".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn conflict_reports_fields() {
        let resp = ApiError::Conflict(vec!["email".into()]).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"], CONFLICT_MESSAGE);
        assert_eq!(json["field"], json!(["email"]));
    }

    #[tokio::test]
    async fn storage_errors_hide_details() {
        let err = ApiError::from_store(
            "Failed to fetch employees",
            StoreError::Database(sqlx::Error::PoolTimedOut),
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Failed to fetch employees");
        assert_eq!(json["message"], INTERNAL_MESSAGE);
        assert!(!json.to_string().contains("pool"));
    }

    #[test]
    fn store_outcomes_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from_store("x", StoreError::NotFound(3)),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_store("x", StoreError::Conflict(vec!["emp_id".into()])),
            ApiError::Conflict(f) if f == ["emp_id"]
        ));
        assert!(matches!(
            ApiError::from_store(
                "x",
                StoreError::Constraint("employees_left_date_matches_status".into())
            ),
            ApiError::Validation(_)
        ));
    }
}
