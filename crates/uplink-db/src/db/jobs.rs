//! Processing job queue repository
//!
//! Submission side only: one row per job, drained by an external worker.
//! Retry policy belongs to that worker, not to the enqueuer.

use sqlx::PgPool;
use uuid::Uuid;

use uplink_core::models::JobType;
use uplink_core::AppError;

/// Channel name for PostgreSQL NOTIFY when a new job is created.
pub const JOB_NOTIFY_CHANNEL: &str = "uplink_new_job";

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending job and notify listeners. Returns the job id.
    pub async fn enqueue(
        &self,
        job_type: JobType,
        payload: serde_json::Value,
    ) -> Result<Uuid, AppError> {
        let job_id: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO processing_jobs (id, job_type, payload, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job_type.to_string())
        .bind(&payload)
        .fetch_one(&self.pool)
        .await?;

        // Wake the worker immediately; polling covers missed notifications.
        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(JOB_NOTIFY_CHANNEL)
            .bind(job_id.0.to_string())
            .execute(&self.pool)
            .await?;

        tracing::debug!(job_id = %job_id.0, job_type = %job_type, "Job enqueued");

        Ok(job_id.0)
    }
}
