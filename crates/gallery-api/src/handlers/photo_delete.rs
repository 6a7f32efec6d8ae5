use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use gallery_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::photo_lifecycle::PhotoLifecycleService;

/// Delete a photo and its stored file.
///
/// The stored file is removed best-effort; the metadata row decides the outcome.
#[utoipa::path(
    delete,
    path = "/api/v0/photos/{id}",
    tag = "photos",
    params(
        ("id" = i64, Path, description = "Photo ID")
    ),
    responses(
        (status = 204, description = "Photo deleted successfully"),
        (status = 404, description = "Photo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(lifecycle), fields(photo_id = id, operation = "delete_photo"))]
pub async fn delete_photo(
    Path(id): Path<i64>,
    State(lifecycle): State<PhotoLifecycleService>,
) -> Result<StatusCode, HttpAppError> {
    if !lifecycle.delete(id).await? {
        return Err(AppError::NotFound("Photo not found".to_string()).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
