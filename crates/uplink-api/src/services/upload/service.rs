//! Upload pipeline orchestrator
//!
//! One instance per process, one `handle` call per request. Files within a
//! request are processed strictly sequentially, each file's full chain
//! (upload → record → enqueue → cleanup) completing before the next starts.
//! Only request-fatal conditions reach the caller; per-file conditions are
//! absorbed into logs and into which files are missing from the results.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::Multipart;

use uplink_core::models::{
    JobType, MediaMetadataSkeleton, NewFileRecord, ProcessingJobPayload,
};
use uplink_core::policy::normalize_content_type;
use uplink_core::{AppError, Config, UploadPolicy};
use uplink_storage::{derive_key, public_url, ObjectHeaders, Storage};

use super::traits::{JobSink, RecordStore};
use super::types::{FileOutcome, IncomingFilePart, SkipReason};
use crate::utils::multipart::collect_file_parts;

/// Pipeline configuration, threaded in at construction. Bucket and region
/// stay optional: their absence rejects requests with a descriptive
/// missing-configuration error instead of failing startup.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Directory multipart parts are spooled into while a request is parsed.
    pub spool_dir: PathBuf,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            s3_bucket: config.storage.s3_bucket.clone(),
            s3_region: config.storage.s3_region.clone(),
            spool_dir: std::env::temp_dir(),
        }
    }
}

/// The per-request upload pipeline.
pub struct UploadPipeline {
    policy: UploadPolicy,
    config: PipelineConfig,
    storage: Option<Arc<dyn Storage>>,
    records: Arc<dyn RecordStore>,
    jobs: Arc<dyn JobSink>,
}

impl UploadPipeline {
    pub fn new(
        policy: UploadPolicy,
        config: PipelineConfig,
        storage: Option<Arc<dyn Storage>>,
        records: Arc<dyn RecordStore>,
        jobs: Arc<dyn JobSink>,
    ) -> Self {
        Self {
            policy,
            config,
            storage,
            records,
            jobs,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Bucket, region, and a storage client must all be present before any
    /// parsing or object write happens.
    fn require_storage(&self) -> Result<(&Arc<dyn Storage>, &str, &str), AppError> {
        let bucket = self
            .config
            .s3_bucket
            .as_deref()
            .ok_or_else(|| AppError::MissingConfig("S3_BUCKET is not set".to_string()))?;
        let region = self
            .config
            .s3_region
            .as_deref()
            .ok_or_else(|| AppError::MissingConfig("S3_REGION is not set".to_string()))?;
        let storage = self.storage.as_ref().ok_or_else(|| {
            AppError::MissingConfig("object storage client is not configured".to_string())
        })?;
        Ok((storage, bucket, region))
    }

    /// Full request entry point: parse the multipart stream with the policy
    /// as admission filter, then run the per-file chain over the survivors.
    pub async fn handle(&self, multipart: Multipart) -> Result<Vec<uplink_core::models::FileRecord>, AppError> {
        self.require_storage()?;
        let parts = collect_file_parts(multipart, &self.policy, &self.config.spool_dir).await?;
        self.run(parts).await
    }

    /// The ingestion loop. Strictly sequential, arrival order; cleanup runs
    /// for every part on every path. Zero surviving files is request-fatal.
    pub async fn run(
        &self,
        parts: Vec<IncomingFilePart>,
    ) -> Result<Vec<uplink_core::models::FileRecord>, AppError> {
        let check = self.require_storage();
        if let Err(err) = check {
            // Spooled parts must not outlive the request even on rejection.
            for part in &parts {
                remove_spool_file(part).await;
            }
            return Err(err);
        }

        let mut records = Vec::new();
        for part in parts {
            let outcome = self.process_file(&part).await;
            remove_spool_file(&part).await;
            if let FileOutcome::Recorded(record) = outcome {
                records.push(record);
            }
        }

        if records.is_empty() {
            return Err(AppError::NoValidFiles);
        }
        Ok(records)
    }

    /// One file's trip through the chain. Never returns an error: failures
    /// become `FileOutcome::Errored` so the loop continues with the next file.
    async fn process_file(&self, part: &IncomingFilePart) -> FileOutcome {
        // Parts can be constructed without going through the multipart
        // admission filter, so the policy is applied again here.
        if !self.policy.is_allowed_type(&part.content_type) {
            tracing::warn!(
                filename = %part.original_filename,
                content_type = %part.content_type,
                size = part.size,
                "Skipping file with disallowed type"
            );
            return FileOutcome::Skipped(SkipReason::DisallowedType);
        }
        let limit = self.policy.size_limit_for(&part.content_type);
        if part.size > limit {
            tracing::warn!(
                filename = %part.original_filename,
                content_type = %part.content_type,
                size = part.size,
                limit = limit,
                "Skipping file over size ceiling"
            );
            return FileOutcome::Skipped(SkipReason::TooLarge { limit });
        }

        match self.ingest_file(part).await {
            Ok(record) => FileOutcome::Recorded(record),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    filename = %part.original_filename,
                    content_type = %part.content_type,
                    "File processing failed; excluding from results"
                );
                FileOutcome::Errored(err)
            }
        }
    }

    /// Derive key → skeleton → storage write → record → enqueue.
    ///
    /// A storage-write failure aborts the file here: no record is persisted
    /// for an object that was never written. Enqueue failure after a
    /// successful persist is absorbed: the record already exists and the
    /// queue worker's backfill can pick it up.
    async fn ingest_file(
        &self,
        part: &IncomingFilePart,
    ) -> Result<uplink_core::models::FileRecord, AppError> {
        let (storage, bucket, region) = self.require_storage()?;

        let derived = derive_key(&part.original_filename, &part.content_type);
        let file_type = normalize_content_type(&part.content_type);
        let skeleton = MediaMetadataSkeleton::for_content_type(&file_type);

        let data = tokio::fs::read(&part.temp_path).await?;
        let headers = ObjectHeaders::new(
            &file_type,
            &derived.sanitized_name,
            &part.original_filename,
        )
        .with_metadata(skeleton.string_fields());

        storage
            .put(&derived.key, data, &headers)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let url = public_url(bucket, region, &derived.key);
        let record = self
            .records
            .create(NewFileRecord {
                storage_key: derived.key,
                url,
                file_type,
                original_filename: part.original_filename.clone(),
                size: part.size as i64,
                metadata: skeleton,
            })
            .await?;

        // Persist-before-enqueue: the payload snapshots a record that is
        // already durable. The enqueue itself never fails the file.
        let payload = ProcessingJobPayload::from_record(&record);
        match serde_json::to_value(&payload) {
            Ok(json) => match self.jobs.enqueue(JobType::ProcessMedia, json).await {
                Ok(job_id) => {
                    tracing::info!(
                        record_id = %record.id,
                        job_id = %job_id,
                        storage_key = %record.storage_key,
                        "Processing job enqueued"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        record_id = %record.id,
                        "Failed to enqueue processing job"
                    );
                }
            },
            Err(err) => {
                tracing::error!(
                    error = %err,
                    record_id = %record.id,
                    "Failed to serialize job payload"
                );
            }
        }

        Ok(record)
    }
}

/// Remove a part's spool file. Deletion failure is a warning, never an
/// error: it must not affect the file's result.
pub async fn remove_spool_file(part: &IncomingFilePart) {
    if let Err(err) = tokio::fs::remove_file(&part.temp_path).await {
        tracing::warn!(
            error = %err,
            path = %part.temp_path.display(),
            "Failed to remove spool file"
        );
    }
}
