//! DEPOT Server — Application entry point.

mod config;

use anyhow::Context;
use depot_access::{AuditRecorder, PermissionService};
use depot_api::AppState;
use depot_db::repository::{
    SurrealAuditLogRepository, SurrealDepartmentRepository, SurrealPermissionRepository,
};
use depot_db::{run_migrations, seed_departments};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("depot=info".parse()?),
        )
        .json()
        .init();

    tracing::info!("Starting DEPOT server...");

    let config = ServerConfig::from_env()?;

    let db = config
        .db
        .connect()
        .await
        .context("connecting to the matrix store")?;

    run_migrations(&db).await.context("running migrations")?;

    let seed: Vec<(&str, &str)> = config
        .seed_departments
        .iter()
        .map(|(slug, name)| (slug.as_str(), name.as_str()))
        .collect();
    seed_departments(&db, &seed)
        .await
        .context("seeding departments")?;

    let state = AppState::new(
        PermissionService::new(SurrealPermissionRepository::new(db.clone())),
        SurrealDepartmentRepository::new(db.clone()),
        AuditRecorder::new(SurrealAuditLogRepository::new(db)),
        config.auth.clone(),
    );

    let app = depot_api::api_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "DEPOT server listening");

    axum::serve(listener, app).await.context("serving")?;

    tracing::info!("DEPOT server stopped.");
    Ok(())
}
