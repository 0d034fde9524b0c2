mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod report;
mod services;

use crate::state::AppState;
use axum::Router;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub fn router() -> Router<AppState> {
    handlers::employee_routes()
}
