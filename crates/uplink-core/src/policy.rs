//! Upload validation policy
//!
//! Pure policy: MIME allow-list membership plus per-category size ceilings.
//! The same predicate is applied twice per file (once as the admission
//! filter while the multipart stream is parsed, once defensively in the
//! per-file chain), so it lives here, independent of any parser.
//!
//! Rejection is a skip, not an error: callers log a structured warning
//! (filename, content_type, size, limit) and exclude the file from results.

use crate::config::PolicyConfig;
use crate::models::MediaCategory;

/// Content types accepted by default, spanning image, video, audio, and
/// document categories. Anything else is rejected at admission.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/webm",
    "video/x-matroska",
    "audio/mpeg",
    "audio/mp4",
    "audio/x-m4a",
    "audio/wav",
    "audio/flac",
    "audio/ogg",
    "application/pdf",
    "text/plain",
];

const MB: u64 = 1024 * 1024;

/// Normalize a MIME type by stripping parameters and lowercasing
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Type/size admission policy for uploads.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    allowed_content_types: Vec<String>,
    max_image_size_bytes: u64,
    max_video_size_bytes: u64,
    max_audio_size_bytes: u64,
    max_other_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_image_size_bytes: 25 * MB,
            max_video_size_bytes: 500 * MB,
            max_audio_size_bytes: 100 * MB,
            max_other_size_bytes: 50 * MB,
        }
    }
}

impl UploadPolicy {
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            allowed_content_types: config
                .allowed_content_types
                .iter()
                .map(|s| normalize_content_type(s))
                .collect(),
            max_image_size_bytes: config.max_image_size_bytes,
            max_video_size_bytes: config.max_video_size_bytes,
            max_audio_size_bytes: config.max_audio_size_bytes,
            max_other_size_bytes: config.max_other_size_bytes,
        }
    }

    /// Allow-list membership. Compares the normalized MIME type only, so
    /// parameters cannot bypass the check.
    pub fn is_allowed_type(&self, content_type: &str) -> bool {
        let normalized = normalize_content_type(content_type);
        self.allowed_content_types.iter().any(|ct| *ct == normalized)
    }

    /// Size ceiling in bytes for the file's MIME category.
    pub fn size_limit_for(&self, content_type: &str) -> u64 {
        match MediaCategory::from_content_type(content_type) {
            MediaCategory::Image => self.max_image_size_bytes,
            MediaCategory::Video => self.max_video_size_bytes,
            MediaCategory::Audio => self.max_audio_size_bytes,
            MediaCategory::Other => self.max_other_size_bytes,
        }
    }

    /// Combined admission predicate: allow-listed type and within the
    /// category ceiling.
    pub fn accepts(&self, content_type: &str, size: u64) -> bool {
        self.is_allowed_type(content_type) && size <= self.size_limit_for(content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_types_outside_allow_list() {
        let policy = UploadPolicy::default();
        assert!(!policy.is_allowed_type("application/x-executable"));
        assert!(!policy.is_allowed_type("application/octet-stream"));
        assert!(policy.is_allowed_type("image/jpeg"));
        assert!(policy.is_allowed_type("application/pdf"));
    }

    #[test]
    fn mime_parameters_do_not_bypass_the_check() {
        let policy = UploadPolicy::default();
        assert!(policy.is_allowed_type("Image/JPEG; charset=utf-8"));
        assert!(!policy.is_allowed_type("application/x-executable; foo=bar"));
    }

    #[test]
    fn category_ceilings_match_policy() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.size_limit_for("video/mp4"), 500 * MB);
        assert_eq!(policy.size_limit_for("audio/mpeg"), 100 * MB);
        assert_eq!(policy.size_limit_for("image/png"), 25 * MB);
        assert_eq!(policy.size_limit_for("application/pdf"), 50 * MB);
    }

    #[test]
    fn accepts_enforces_both_type_and_size() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts("image/jpeg", MB));
        // 600MB video exceeds the 500MB ceiling
        assert!(!policy.accepts("video/mp4", 600 * MB));
        // exactly at the ceiling is still accepted
        assert!(policy.accepts("video/mp4", 500 * MB));
        assert!(!policy.accepts("application/x-executable", 1));
    }
}
