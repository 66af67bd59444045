//! Database repositories for the ingest gateway
//!
//! Two tables back the pipeline: `files` (one metadata record per stored
//! object) and `processing_jobs` (the async post-processing queue). The
//! worker that drains `processing_jobs` lives outside this repository.

pub mod db;

pub use db::{run_migrations, FileRecordRepository, JobRepository};
