//! Upload pipeline integration tests over in-memory collaborators and a
//! real local-filesystem storage backend.

mod helpers;

use std::sync::Arc;

use uplink_core::models::JobType;
use uplink_core::AppError;
use uplink_storage::{LocalStorage, Storage};

use helpers::{
    build_pipeline, event_log, spool_part, spool_part_with_declared_size, FailingStorage,
    MemoryJobSink, MemoryRecordStore, TEST_BUCKET, TEST_REGION,
};

const MB: u64 = 1024 * 1024;

struct Fixture {
    _objects: tempfile::TempDir,
    spool: tempfile::TempDir,
    storage: Arc<LocalStorage>,
    records: Arc<MemoryRecordStore>,
    jobs: Arc<MemoryJobSink>,
    log: helpers::EventLog,
}

impl Fixture {
    async fn new() -> Self {
        let objects = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(objects.path()).await.unwrap());
        let log = event_log();
        Self {
            storage,
            records: Arc::new(MemoryRecordStore::new(log.clone())),
            jobs: Arc::new(MemoryJobSink::new(log.clone())),
            log,
            _objects: objects,
            spool,
        }
    }

    fn pipeline(&self) -> uplink_api::services::upload::UploadPipeline {
        build_pipeline(
            self.spool.path(),
            self.storage.clone(),
            self.records.clone(),
            self.jobs.clone(),
        )
    }
}

#[tokio::test]
async fn single_image_runs_the_full_chain() {
    let fx = Fixture::new().await;
    let part = spool_part(fx.spool.path(), "cat photo.png", "image/png", b"pngbytes");
    let temp_path = part.temp_path.clone();

    let records = fx.pipeline().run(vec![part]).await.unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert!(record.storage_key.starts_with("uploads/images/"));
    assert!(record.storage_key.ends_with("-cat_photo.png"));
    assert_eq!(record.file_type, "image/png");
    assert_eq!(record.original_filename, "cat photo.png");
    assert_eq!(record.size, 8);
    assert_eq!(
        record.url,
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            TEST_BUCKET, TEST_REGION, record.storage_key
        )
    );

    // Skeleton fields start unresolved for every category.
    assert_eq!(record.duration, None);
    assert_eq!(record.width, None);
    assert_eq!(record.height, None);

    // The object was actually written under the derived key.
    assert!(fx.storage.exists(&record.storage_key).await.unwrap());

    // Exactly one job, carrying the persisted record's own fields.
    let jobs = fx.jobs.enqueued();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].0, JobType::ProcessMedia);
    let payload = &jobs[0].1;
    assert_eq!(payload["record_id"], record.id.to_string());
    assert_eq!(payload["file_type"], "image/png");
    assert_eq!(payload["storage_key"], record.storage_key);
    assert_eq!(payload["size"], 8);

    // Spool file is gone after the run.
    assert!(!temp_path.exists());
}

#[tokio::test]
async fn record_is_persisted_before_its_job_is_enqueued() {
    let fx = Fixture::new().await;
    let part = spool_part(fx.spool.path(), "a.pdf", "application/pdf", b"%PDF-");

    let records = fx.pipeline().run(vec![part]).await.unwrap();
    let id = records[0].id;

    let events = fx.log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![format!("record:{}", id), format!("enqueue:{}", id)]
    );
}

#[tokio::test]
async fn oversized_video_is_skipped_and_request_fails_with_no_valid_files() {
    let fx = Fixture::new().await;
    let part =
        spool_part_with_declared_size(fx.spool.path(), "movie.mp4", "video/mp4", 600 * MB);
    let temp_path = part.temp_path.clone();

    let err = fx.pipeline().run(vec![part]).await.unwrap_err();
    assert!(matches!(err, AppError::NoValidFiles));

    assert!(fx.records.created().is_empty());
    assert!(fx.jobs.enqueued().is_empty());
    assert!(!temp_path.exists());
}

#[tokio::test]
async fn disallowed_type_is_skipped_but_valid_sibling_survives() {
    let fx = Fixture::new().await;
    let bad = spool_part(
        fx.spool.path(),
        "tool.exe",
        "application/x-executable",
        b"MZ",
    );
    let good = spool_part(fx.spool.path(), "song.mp3", "audio/mpeg", b"ID3");
    let bad_path = bad.temp_path.clone();
    let good_path = good.temp_path.clone();

    let records = fx.pipeline().run(vec![bad, good]).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_type, "audio/mpeg");
    assert!(records[0].storage_key.starts_with("uploads/audio/"));

    assert_eq!(fx.jobs.enqueued().len(), 1);
    assert!(!bad_path.exists());
    assert!(!good_path.exists());
}

#[tokio::test]
async fn duplicate_filenames_get_distinct_keys_in_arrival_order() {
    let fx = Fixture::new().await;
    let first = spool_part(fx.spool.path(), "photo.jpg", "image/jpeg", b"one");
    let second = spool_part(fx.spool.path(), "photo.jpg", "image/jpeg", b"three");

    let records = fx.pipeline().run(vec![first, second]).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].storage_key, records[1].storage_key);
    assert_eq!(records[0].original_filename, "photo.jpg");
    assert_eq!(records[1].original_filename, "photo.jpg");

    // Results follow arrival order; sizes distinguish the two parts.
    assert_eq!(records[0].size, 3);
    assert_eq!(records[1].size, 5);

    assert!(fx.storage.exists(&records[0].storage_key).await.unwrap());
    assert!(fx.storage.exists(&records[1].storage_key).await.unwrap());
}

#[tokio::test]
async fn missing_bucket_config_rejects_before_any_side_effect() {
    let fx = Fixture::new().await;
    let part = spool_part(fx.spool.path(), "cat.png", "image/png", b"png");
    let temp_path = part.temp_path.clone();

    let pipeline = uplink_api::services::upload::UploadPipeline::new(
        uplink_core::UploadPolicy::default(),
        uplink_api::services::upload::PipelineConfig {
            s3_bucket: None,
            s3_region: Some(TEST_REGION.to_string()),
            spool_dir: fx.spool.path().to_path_buf(),
        },
        Some(fx.storage.clone()),
        fx.records.clone(),
        fx.jobs.clone(),
    );

    let err = pipeline.run(vec![part]).await.unwrap_err();
    assert!(matches!(err, AppError::MissingConfig(_)));

    // No record, no job, no object, and the spool file is still cleaned up.
    assert!(fx.records.created().is_empty());
    assert!(fx.jobs.enqueued().is_empty());
    assert!(!temp_path.exists());
}

#[tokio::test]
async fn storage_write_failure_excludes_the_file_without_a_record() {
    let fx = Fixture::new().await;
    let part = spool_part(fx.spool.path(), "cat.png", "image/png", b"png");
    let temp_path = part.temp_path.clone();

    let pipeline = build_pipeline(
        fx.spool.path(),
        Arc::new(FailingStorage),
        fx.records.clone(),
        fx.jobs.clone(),
    );

    let err = pipeline.run(vec![part]).await.unwrap_err();
    assert!(matches!(err, AppError::NoValidFiles));

    // No record may exist for an object that was never written.
    assert!(fx.records.created().is_empty());
    assert!(fx.jobs.enqueued().is_empty());
    assert!(!temp_path.exists());
}

#[tokio::test]
async fn record_store_failure_does_not_affect_later_files() {
    let objects = tempfile::tempdir().unwrap();
    let spool = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalStorage::new(objects.path()).await.unwrap());
    let log = event_log();
    let records = Arc::new(MemoryRecordStore::failing_next(log.clone(), 1));
    let jobs = Arc::new(MemoryJobSink::new(log));

    let first = spool_part(spool.path(), "a.png", "image/png", b"aa");
    let second = spool_part(spool.path(), "b.png", "image/png", b"bb");

    let pipeline = build_pipeline(spool.path(), storage, records.clone(), jobs.clone());
    let results = pipeline.run(vec![first, second]).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].original_filename, "b.png");
    assert_eq!(jobs.enqueued().len(), 1);
}

#[tokio::test]
async fn enqueue_failure_is_absorbed_and_the_record_still_counts() {
    let objects = tempfile::tempdir().unwrap();
    let spool = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalStorage::new(objects.path()).await.unwrap());
    let log = event_log();
    let records = Arc::new(MemoryRecordStore::new(log.clone()));
    let jobs = Arc::new(MemoryJobSink::failing(log));

    let part = spool_part(spool.path(), "doc.pdf", "application/pdf", b"%PDF-");

    let pipeline = build_pipeline(spool.path(), storage, records.clone(), jobs.clone());
    let results = pipeline.run(vec![part]).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(records.created().len(), 1);
    assert!(jobs.enqueued().is_empty());
}

#[tokio::test]
async fn empty_part_list_is_no_valid_files() {
    let fx = Fixture::new().await;
    let err = fx.pipeline().run(Vec::new()).await.unwrap_err();
    assert!(matches!(err, AppError::NoValidFiles));
}
