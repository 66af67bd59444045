//! Types for the upload pipeline

use std::path::PathBuf;

use uplink_core::models::FileRecord;
use uplink_core::AppError;

/// A file part that survived multipart admission, spooled to disk.
///
/// Owned by the orchestrator for the duration of one file's processing; the
/// spool file is removed on every exit path, so nothing of the part persists
/// past its iteration of the loop.
#[derive(Debug)]
pub struct IncomingFilePart {
    pub temp_path: PathBuf,
    pub content_type: String,
    pub size: u64,
    pub original_filename: String,
}

/// Why a file was excluded from results without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// MIME type outside the allow-list.
    DisallowedType,
    /// Size over the category ceiling (bytes).
    TooLarge { limit: u64 },
}

/// Outcome of one file's trip through the pipeline.
#[derive(Debug)]
pub enum FileOutcome {
    Recorded(FileRecord),
    Skipped(SkipReason),
    Errored(AppError),
}
