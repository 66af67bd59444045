//! Persisted file record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::media::MediaMetadataSkeleton;

/// Metadata record for a stored object. Created once per accepted file and
/// never mutated by the upload pipeline; the nullable media fields are
/// filled by the downstream processing stage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FileRecord {
    pub id: Uuid,
    /// Unique storage key; uniqueness comes from the embedded random token,
    /// not from a database constraint.
    pub storage_key: String,
    pub url: String,
    pub file_type: String,
    pub original_filename: String,
    pub size: i64,
    pub duration: Option<f64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
}

/// Fields for creating a [`FileRecord`]; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub storage_key: String,
    pub url: String,
    pub file_type: String,
    pub original_filename: String,
    pub size: i64,
    pub metadata: MediaMetadataSkeleton,
}
