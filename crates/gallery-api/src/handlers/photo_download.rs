use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use gallery_core::AppError;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::constants::PHOTO_CACHE_CONTROL;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::photo_lifecycle::PhotoLifecycleService;
use crate::utils::upload::sanitize_filename;

/// Weak comparison of an `If-None-Match` value against our ETag.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let opaque = |tag: &str| tag.trim().trim_start_matches("W/").to_string();
    let ours = opaque(etag);

    if_none_match
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || opaque(candidate) == ours)
}

fn content_disposition(original_file_name: &str) -> String {
    format!(
        "inline; filename=\"{}\"; filename*=UTF-8''{}",
        sanitize_filename(original_file_name),
        utf8_percent_encode(original_file_name, NON_ALPHANUMERIC)
    )
}

#[utoipa::path(
    get,
    path = "/api/v0/photos/{id}/file",
    tag = "photos",
    params(
        ("id" = i64, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo file", content_type = "application/octet-stream"),
        (status = 304, description = "Not modified"),
        (status = 404, description = "Photo or its file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn download_photo(
    Path(id): Path<i64>,
    State(lifecycle): State<PhotoLifecycleService>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let photo = lifecycle
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    let etag = photo.etag();

    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| etag_matches(v, &etag));

    if not_modified {
        lifecycle.ensure_content(&photo).await?;
        tracing::debug!(photo_id = id, "ETag matched, returning 304");
        return Ok((
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, etag),
                (header::CACHE_CONTROL, PHOTO_CACHE_CONTROL.to_string()),
            ],
        )
            .into_response());
    }

    tracing::debug!(photo_id = id, storage_key = %photo.file_path, "Streaming file from storage");

    let stream = lifecycle.open_content(&photo).await?;
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, photo.mime_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&photo.original_file_name),
        )
        .header(header::CACHE_CONTROL, PHOTO_CACHE_CONTROL)
        .header(header::ETAG, etag)
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
