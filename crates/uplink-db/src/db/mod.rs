//! Repository implementations for database operations

pub mod files;
pub mod jobs;

pub use files::FileRecordRepository;
pub use jobs::JobRepository;

/// Apply embedded migrations (files + processing_jobs tables).
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
