//! Multipart ingestion
//!
//! Streams `file` fields from a multipart request into spool files, applying
//! the upload policy as an admission filter: disallowed types are drained
//! without buffering, and the per-category size ceiling is enforced while
//! streaming so an oversized part never fully lands on disk.

use std::path::Path;

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use uplink_core::{AppError, UploadPolicy};

use crate::services::upload::types::IncomingFilePart;
use crate::services::upload::service::remove_spool_file;

/// Field name carrying file uploads; other fields are ignored.
const FILE_FIELD: &str = "file";

/// Parse the multipart stream and spool accepted `file` parts.
///
/// Errors are request-fatal: a malformed stream maps to `InvalidInput`, a
/// request with no `file` field at all to `NoFileField`. Parts already
/// spooled when an error occurs are cleaned up before returning.
pub async fn collect_file_parts(
    mut multipart: Multipart,
    policy: &UploadPolicy,
    spool_dir: &Path,
) -> Result<Vec<IncomingFilePart>, AppError> {
    let mut parts: Vec<IncomingFilePart> = Vec::new();
    let mut saw_file_field = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                discard_parts(&parts).await;
                return Err(AppError::InvalidInput(format!(
                    "Failed to read multipart: {}",
                    err
                )));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        saw_file_field = true;

        let original_filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        // Admission: reject before buffering anything.
        if !policy.is_allowed_type(&content_type) {
            tracing::warn!(
                filename = %original_filename,
                content_type = %content_type,
                "Rejected file type at admission"
            );
            if let Err(err) = drain_field(field).await {
                discard_parts(&parts).await;
                return Err(err);
            }
            continue;
        }

        match spool_field(field, policy, spool_dir, &original_filename, &content_type).await {
            Ok(Some(part)) => parts.push(part),
            Ok(None) => {} // oversized, skipped with a warning
            Err(err) => {
                discard_parts(&parts).await;
                return Err(err);
            }
        }
    }

    if !saw_file_field {
        return Err(AppError::NoFileField);
    }
    Ok(parts)
}

/// Stream one field to a spool file, enforcing the category ceiling as bytes
/// arrive. Returns `None` when the part exceeded its ceiling.
async fn spool_field(
    mut field: Field<'_>,
    policy: &UploadPolicy,
    spool_dir: &Path,
    original_filename: &str,
    content_type: &str,
) -> Result<Option<IncomingFilePart>, AppError> {
    let limit = policy.size_limit_for(content_type);
    let temp_path = spool_dir.join(format!("uplink-{}", Uuid::new_v4()));
    let mut file = tokio::fs::File::create(&temp_path).await?;
    let mut size: u64 = 0;

    loop {
        let chunk = match field.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(err) => {
                drop(file);
                remove_temp(&temp_path).await;
                return Err(AppError::InvalidInput(format!(
                    "Failed to read file data: {}",
                    err
                )));
            }
        };

        size += chunk.len() as u64;
        if size > limit {
            tracing::warn!(
                filename = %original_filename,
                content_type = %content_type,
                size = size,
                limit = limit,
                "Rejected oversized file at admission"
            );
            drop(file);
            remove_temp(&temp_path).await;
            // Drain the remainder so the stream can advance to the next part.
            drain_field(field).await?;
            return Ok(None);
        }

        file.write_all(&chunk).await?;
    }

    file.flush().await?;

    Ok(Some(IncomingFilePart {
        temp_path,
        content_type: content_type.to_string(),
        size,
        original_filename: original_filename.to_string(),
    }))
}

/// Consume a rejected field without buffering it.
async fn drain_field(mut field: Field<'_>) -> Result<(), AppError> {
    while field
        .chunk()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
        .is_some()
    {}
    Ok(())
}

async fn remove_temp(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        tracing::warn!(
            error = %err,
            path = %path.display(),
            "Failed to remove spool file"
        );
    }
}

async fn discard_parts(parts: &[IncomingFilePart]) {
    for part in parts {
        remove_spool_file(part).await;
    }
}
