//! Domain models for the upload pipeline

pub mod file;
pub mod job;
pub mod media;

pub use file::{FileRecord, NewFileRecord};
pub use job::{JobType, ProcessingJobPayload};
pub use media::{MediaCategory, MediaMetadataSkeleton};
