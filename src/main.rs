use std::sync::Arc;

mod app;
mod config;
mod db;
mod employees;
mod error;
mod state;
mod storage;

use crate::{
    config::AppConfig, employees::repo::PgEmployeeStore, state::AppState,
    storage::EmployeeStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "employee_records=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let addr = config.addr()?;

    let db = db::connect(&config).await?;
    db::migrate(&db).await?;

    let store = Arc::new(PgEmployeeStore::new(db.clone())) as Arc<dyn EmployeeStore>;
    let app = app::build_app(AppState::from_parts(store, config));

    let served = app::serve(app, addr).await;

    db.close().await;
    tracing::info!("database pool closed");
    served
}
