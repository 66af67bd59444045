use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use uplink_api::services::upload::{PipelineConfig, UploadPipeline};
use uplink_api::state::AppState;
use uplink_core::{Config, UploadPolicy};
use uplink_db::{run_migrations, FileRecordRepository, JobRepository};
use uplink_storage::{create_storage, Storage, StorageError};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    uplink_api::telemetry::init_tracing();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await?;
    run_migrations(&pool).await?;

    // An incomplete storage configuration is not fatal at startup: the
    // pipeline rejects upload requests with a missing-configuration error.
    let storage: Option<Arc<dyn Storage>> = match create_storage(&config.storage).await {
        Ok(storage) => Some(storage),
        Err(StorageError::ConfigError(msg)) => {
            tracing::warn!(
                error = %msg,
                "Object storage not configured; uploads will be rejected"
            );
            None
        }
        Err(err) => return Err(err.into()),
    };

    let records = Arc::new(FileRecordRepository::new(pool.clone()));

    let pipeline = UploadPipeline::new(
        UploadPolicy::from_config(&config.policy),
        PipelineConfig::from_config(&config),
        storage,
        records.clone(),
        Arc::new(JobRepository::new(pool)),
    );

    let app = uplink_api::router(AppState::new(pipeline, records));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server_port)).await?;
    tracing::info!(port = config.server_port, "Uplink API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
