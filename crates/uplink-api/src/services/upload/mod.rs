//! Upload pipeline service
//!
//! The per-request ingestion loop: validate → derive key → metadata skeleton
//! → storage write → record → enqueue → cleanup, per accepted file.

pub mod service;
pub mod traits;
pub mod types;

pub use service::{PipelineConfig, UploadPipeline};
pub use traits::{JobSink, RecordStore};
pub use types::{FileOutcome, IncomingFilePart, SkipReason};
