//! OpenAPI document

use axum::Json;
use utoipa::OpenApi;

use uplink_core::models::{FileRecord, MediaCategory, MediaMetadataSkeleton};

use crate::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(title = "Uplink API", description = "Media upload ingest gateway"),
    paths(
        crate::handlers::upload::upload_files,
        crate::handlers::files::get_file
    ),
    components(schemas(FileRecord, MediaCategory, MediaMetadataSkeleton, ErrorResponse))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
