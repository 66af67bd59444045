//! Storage abstraction trait
//!
//! The upload pipeline only ever writes: one object per accepted file, with
//! content headers and a small metadata map. No read-back is performed, so
//! the trait stays deliberately narrow (`put` plus an existence probe used
//! by tests and tooling).

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Headers attached to a stored object.
#[derive(Debug, Clone)]
pub struct ObjectHeaders {
    /// Declared MIME type of the upload.
    pub content_type: String,
    /// `attachment; filename="{sanitized_name}"`
    pub content_disposition: String,
    /// Metadata map: `original-name` plus every non-null skeleton field,
    /// each coerced to a string.
    pub metadata: Vec<(String, String)>,
}

impl ObjectHeaders {
    pub fn new(content_type: &str, sanitized_name: &str, original_name: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            content_disposition: format!("attachment; filename=\"{}\"", sanitized_name),
            metadata: vec![("original-name".to_string(), original_name.to_string())],
        }
    }

    pub fn with_metadata(mut self, fields: Vec<(String, String)>) -> Self {
        self.metadata.extend(fields);
        self
    }
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait so
/// the pipeline can write objects without coupling to backend details.
/// Retry policy belongs to the backend client, never to this layer.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key` with the given headers.
    async fn put(&self, key: &str, data: Vec<u8>, headers: &ObjectHeaders) -> StorageResult<()>;

    /// Check if an object exists at `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_disposition_and_original_name() {
        let headers = ObjectHeaders::new("image/png", "photo_1.png", "photo 1.png");
        assert_eq!(
            headers.content_disposition,
            "attachment; filename=\"photo_1.png\""
        );
        assert!(headers
            .metadata
            .contains(&("original-name".to_string(), "photo 1.png".to_string())));
    }

    #[test]
    fn with_metadata_appends_skeleton_fields() {
        let headers = ObjectHeaders::new("video/mp4", "clip.mp4", "clip.mp4")
            .with_metadata(vec![("duration".to_string(), "12.5".to_string())]);
        assert_eq!(headers.metadata.len(), 2);
    }
}
