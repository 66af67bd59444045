//! Processing job types and payload

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use super::file::FileRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    ProcessMedia,
}

impl Display for JobType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JobType::ProcessMedia => write!(f, "process-media"),
        }
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process-media" => Ok(JobType::ProcessMedia),
            _ => Err(anyhow::anyhow!("Invalid job type: {}", s)),
        }
    }
}

/// Snapshot of a persisted record taken at enqueue time. Holds no further
/// relationship to the record after submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingJobPayload {
    pub record_id: Uuid,
    pub storage_key: String,
    pub url: String,
    pub file_type: String,
    pub original_filename: String,
    pub size: i64,
}

impl ProcessingJobPayload {
    /// Build the payload from a record that has already been persisted.
    /// `file_type` is always the record's own type field.
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            record_id: record.id,
            storage_key: record.storage_key.clone(),
            url: record.url.clone(),
            file_type: record.file_type.clone(),
            original_filename: record.original_filename.clone(),
            size: record.size,
        }
    }
}
