//! Media category and metadata skeleton
//!
//! The skeleton is a placeholder: every field starts null and is filled by a
//! downstream enrichment stage, never by this pipeline.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// MIME category: the slash-prefix class of a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
    /// Documents, text, and anything else outside the media prefixes.
    Other,
}

impl MediaCategory {
    pub fn from_content_type(content_type: &str) -> Self {
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();
        if normalized.starts_with("image/") {
            MediaCategory::Image
        } else if normalized.starts_with("video/") {
            MediaCategory::Video
        } else if normalized.starts_with("audio/") {
            MediaCategory::Audio
        } else {
            MediaCategory::Other
        }
    }
}

/// Nullable media attributes allocated per category, filled downstream.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaMetadataSkeleton {
    pub category: MediaCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

impl MediaMetadataSkeleton {
    /// Build the skeleton shape for a category. All values start null.
    pub fn for_category(category: MediaCategory) -> Self {
        Self {
            category,
            duration: None,
            width: None,
            height: None,
        }
    }

    pub fn for_content_type(content_type: &str) -> Self {
        Self::for_category(MediaCategory::from_content_type(content_type))
    }

    /// Field names the downstream stage is expected to fill for this category.
    pub fn relevant_fields(&self) -> &'static [&'static str] {
        match self.category {
            MediaCategory::Video => &["duration", "width", "height"],
            MediaCategory::Audio => &["duration"],
            MediaCategory::Image => &["width", "height"],
            MediaCategory::Other => &[],
        }
    }

    /// Non-null fields coerced to strings, for the object-storage metadata map.
    pub fn string_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(duration) = self.duration {
            fields.push(("duration".to_string(), duration.to_string()));
        }
        if let Some(width) = self.width {
            fields.push(("width".to_string(), width.to_string()));
        }
        if let Some(height) = self.height {
            fields.push(("height".to_string(), height.to_string()));
        }
        fields
    }
}
