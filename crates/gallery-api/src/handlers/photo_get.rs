use axum::{
    extract::{Path, State},
    Json,
};
use gallery_core::{models::PhotoResponse, AppError};

use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::photo_lifecycle::PhotoLifecycleService;

#[utoipa::path(
    get,
    path = "/api/v0/photos",
    tag = "photos",
    responses(
        (status = 200, description = "All photos, newest first", body = Vec<PhotoResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(lifecycle), fields(operation = "list_photos"))]
pub async fn list_photos(
    State(lifecycle): State<PhotoLifecycleService>,
) -> Result<Json<Vec<PhotoResponse>>, HttpAppError> {
    let photos = lifecycle.list().await?;

    let responses = photos
        .into_iter()
        .map(|photo| PhotoResponse::from_photo(photo, API_PREFIX))
        .collect();

    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v0/photos/{id}",
    tag = "photos",
    params(
        ("id" = i64, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo found", body = PhotoResponse),
        (status = 404, description = "Photo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(lifecycle), fields(photo_id = id, operation = "get_photo"))]
pub async fn get_photo(
    Path(id): Path<i64>,
    State(lifecycle): State<PhotoLifecycleService>,
) -> Result<Json<PhotoResponse>, HttpAppError> {
    let photo = lifecycle
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    Ok(Json(PhotoResponse::from_photo(photo, API_PREFIX)))
}
