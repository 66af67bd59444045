//! Shared test fixtures: in-memory collaborators and spool helpers.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use uplink_api::services::upload::{
    IncomingFilePart, JobSink, PipelineConfig, RecordStore, UploadPipeline,
};
use uplink_core::models::{FileRecord, JobType, NewFileRecord};
use uplink_core::{AppError, UploadPolicy};
use uplink_storage::{ObjectHeaders, Storage, StorageError, StorageResult};

pub const TEST_BUCKET: &str = "uplink-test";
pub const TEST_REGION: &str = "us-east-1";

/// Ordered log of side effects, shared across fakes, used to assert
/// persist-before-enqueue.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// In-memory record store. `fail_next` failures are consumed before
/// creates start succeeding again.
pub struct MemoryRecordStore {
    pub records: Mutex<Vec<FileRecord>>,
    fail_next: AtomicUsize,
    log: EventLog,
}

impl MemoryRecordStore {
    pub fn new(log: EventLog) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_next: AtomicUsize::new(0),
            log,
        }
    }

    pub fn failing_next(log: EventLog, failures: usize) -> Self {
        let store = Self::new(log);
        store.fail_next.store(failures, Ordering::SeqCst);
        store
    }

    pub fn created(&self) -> Vec<FileRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, new: NewFileRecord) -> Result<FileRecord, AppError> {
        if self.fail_next.load(Ordering::SeqCst) > 0 {
            self.fail_next.fetch_sub(1, Ordering::SeqCst);
            return Err(AppError::Internal("record store unavailable".to_string()));
        }

        let record = FileRecord {
            id: Uuid::new_v4(),
            storage_key: new.storage_key,
            url: new.url,
            file_type: new.file_type,
            original_filename: new.original_filename,
            size: new.size,
            duration: new.metadata.duration,
            width: new.metadata.width,
            height: new.metadata.height,
            uploaded_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        self.log
            .lock()
            .unwrap()
            .push(format!("record:{}", record.id));
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

/// In-memory job sink.
pub struct MemoryJobSink {
    pub jobs: Mutex<Vec<(JobType, serde_json::Value)>>,
    fail: bool,
    log: EventLog,
}

impl MemoryJobSink {
    pub fn new(log: EventLog) -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail: false,
            log,
        }
    }

    pub fn failing(log: EventLog) -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail: true,
            log,
        }
    }

    pub fn enqueued(&self) -> Vec<(JobType, serde_json::Value)> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSink for MemoryJobSink {
    async fn enqueue(
        &self,
        job_type: JobType,
        payload: serde_json::Value,
    ) -> Result<Uuid, AppError> {
        if self.fail {
            return Err(AppError::Internal("job queue unavailable".to_string()));
        }
        let record_id = payload
            .get("record_id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        self.jobs.lock().unwrap().push((job_type, payload));
        self.log
            .lock()
            .unwrap()
            .push(format!("enqueue:{}", record_id));
        Ok(Uuid::new_v4())
    }
}

/// Storage backend that always fails writes.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put(
        &self,
        key: &str,
        _data: Vec<u8>,
        _headers: &ObjectHeaders,
    ) -> StorageResult<()> {
        Err(StorageError::UploadFailed(format!(
            "injected failure for {}",
            key
        )))
    }

    async fn exists(&self, _key: &str) -> StorageResult<bool> {
        Ok(false)
    }
}

/// Write `data` to a spool file and build the matching part descriptor.
pub fn spool_part(
    spool_dir: &Path,
    original_filename: &str,
    content_type: &str,
    data: &[u8],
) -> IncomingFilePart {
    let temp_path = spool_dir.join(format!("uplink-{}", Uuid::new_v4()));
    std::fs::write(&temp_path, data).expect("write spool file");
    IncomingFilePart {
        temp_path,
        content_type: content_type.to_string(),
        size: data.len() as u64,
        original_filename: original_filename.to_string(),
    }
}

/// Like [`spool_part`] but with a declared size different from the spooled
/// bytes, for exercising size ceilings without writing gigabytes.
pub fn spool_part_with_declared_size(
    spool_dir: &Path,
    original_filename: &str,
    content_type: &str,
    declared_size: u64,
) -> IncomingFilePart {
    let mut part = spool_part(spool_dir, original_filename, content_type, b"stub");
    part.size = declared_size;
    part
}

pub fn pipeline_config(spool_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        s3_bucket: Some(TEST_BUCKET.to_string()),
        s3_region: Some(TEST_REGION.to_string()),
        spool_dir: spool_dir.to_path_buf(),
    }
}

/// Assemble a pipeline over the given collaborators with test config.
pub fn build_pipeline(
    spool_dir: &Path,
    storage: Arc<dyn Storage>,
    records: Arc<MemoryRecordStore>,
    jobs: Arc<MemoryJobSink>,
) -> UploadPipeline {
    UploadPipeline::new(
        UploadPolicy::default(),
        pipeline_config(spool_dir),
        Some(storage),
        records,
        jobs,
    )
}
