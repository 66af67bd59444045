//! File upload handler

use axum::extract::{Multipart, State};
use axum::Json;

use uplink_core::models::FileRecord;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Upload one or more files.
///
/// Multipart form with repeatable `file` fields. Returns the ordered list of
/// created records; files that fail type/size policy are silently excluded.
/// The request fails as a whole only when no file field is present, storage
/// configuration is missing, the stream is malformed, or zero files survive.
#[utoipa::path(
    post,
    path = "/api/v0/files",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Records for every accepted file", body = Vec<FileRecord>),
        (status = 400, description = "Malformed multipart or no file field", body = crate::error::ErrorResponse),
        (status = 422, description = "No file survived validation", body = crate::error::ErrorResponse),
        (status = 500, description = "Missing storage configuration or internal error", body = crate::error::ErrorResponse),
    ),
    tag = "files"
)]
pub async fn upload_files(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<FileRecord>>, HttpAppError> {
    let records = state
        .pipeline
        .handle(multipart)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(records))
}
