//! File record fetch handler

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use uplink_core::models::FileRecord;
use uplink_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Fetch a file record by id.
#[utoipa::path(
    get,
    path = "/api/v0/files/{id}",
    params(
        ("id" = Uuid, Path, description = "File record ID")
    ),
    responses(
        (status = 200, description = "File record found", body = FileRecord),
        (status = 404, description = "File record not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse),
    ),
    tag = "files"
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FileRecord>, HttpAppError> {
    let record = state
        .records
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File record {}", id)))?;
    Ok(Json(record))
}
