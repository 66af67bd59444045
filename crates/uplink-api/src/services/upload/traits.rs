//! Seams between the pipeline and its external collaborators
//!
//! The orchestrator talks to persistence and the job queue through these
//! traits so the per-file chain can be exercised with in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use uplink_core::models::{FileRecord, JobType, NewFileRecord};
use uplink_core::AppError;
use uplink_db::{FileRecordRepository, JobRepository};

/// Persists one metadata record per stored object and serves lookups for
/// the fetch route.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, new: NewFileRecord) -> Result<FileRecord, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>, AppError>;
}

/// Accepts async processing jobs. Submission only; retries are the worker's
/// concern.
#[async_trait]
pub trait JobSink: Send + Sync {
    async fn enqueue(
        &self,
        job_type: JobType,
        payload: serde_json::Value,
    ) -> Result<Uuid, AppError>;
}

#[async_trait]
impl RecordStore for FileRecordRepository {
    async fn create(&self, new: NewFileRecord) -> Result<FileRecord, AppError> {
        FileRecordRepository::create(self, new).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        FileRecordRepository::get_by_id(self, id).await
    }
}

#[async_trait]
impl JobSink for JobRepository {
    async fn enqueue(
        &self,
        job_type: JobType,
        payload: serde_json::Value,
    ) -> Result<Uuid, AppError> {
        JobRepository::enqueue(self, job_type, payload).await
    }
}
