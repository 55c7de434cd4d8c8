//! Blood on Maple Leaves API server entry point.

use std::sync::Arc;

use maple_content::fs_content_store::FsContentStore;
use maple_core::clock::SystemClock;
use maple_core::ids::UuidV7Generator;
use maple_store::pg_save_ledger::PgSaveLedger;
use maple_store::pg_session_identity::PgSessionIdentityProvider;
use sqlx::postgres::PgPoolOptions;

use maple_api::config::AppConfig;
use maple_api::error::AppError;
use maple_api::state::AppState;
use maple_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Blood on Maple Leaves API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(UuidV7Generator),
        Arc::new(FsContentStore::new(config.scenes_dir.clone())),
        Arc::new(PgSaveLedger::new(pool.clone())),
        Arc::new(PgSessionIdentityProvider::new(pool)),
    )
    .with_policy(config.policy)
    .with_start_scene(&config.start_scene_id);

    let addr = config.bind_addr()?;
    tracing::info!(
        %addr,
        scenes_dir = %config.scenes_dir.display(),
        start_scene_id = %config.start_scene_id,
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, maple_api::app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry::shutdown(tracer_provider);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
