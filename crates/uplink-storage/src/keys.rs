//! Storage key derivation
//!
//! Key format: `uploads/{folder}/{uuid-v4}-{sanitized_name}`. The uuid gives
//! 128 bits of collision resistance, so two uploads with identical filenames
//! in one request still get distinct keys. Pure functions, no error paths.

use uplink_core::models::MediaCategory;
use uuid::Uuid;

/// Placeholder used when the client supplied no usable filename.
const FALLBACK_FILENAME: &str = "file";

const MAX_FILENAME_LENGTH: usize = 255;

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
/// Empty or missing names fall back to a fixed placeholder.
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Storage folder for a MIME type.
pub fn folder_for(content_type: &str) -> &'static str {
    match MediaCategory::from_content_type(content_type) {
        MediaCategory::Image => "images",
        MediaCategory::Video => "videos",
        MediaCategory::Audio => "audio",
        MediaCategory::Other => "documents",
    }
}

/// A derived storage location for an accepted file.
#[derive(Debug, Clone)]
pub struct DerivedKey {
    pub sanitized_name: String,
    pub folder: &'static str,
    pub key: String,
}

/// Derive the storage key for an accepted file descriptor.
pub fn derive_key(original_filename: &str, content_type: &str) -> DerivedKey {
    let sanitized_name = sanitize_filename(original_filename);
    let folder = folder_for(content_type);
    let key = format!("uploads/{}/{}-{}", folder, Uuid::new_v4(), sanitized_name);
    DerivedKey {
        sanitized_name,
        folder,
        key,
    }
}

/// Deterministic public URL for a stored object. Never verified against the
/// object's existence.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}
