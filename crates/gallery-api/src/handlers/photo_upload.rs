use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gallery_core::models::UploadBatchResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::photo_lifecycle::PhotoLifecycleService;
use crate::utils::upload::extract_multipart_files;

/// Status for a finished batch: 201 when every file was stored, 200 when
/// only some were, 400 when none were.
fn batch_status(batch: &UploadBatchResponse) -> StatusCode {
    let succeeded = batch.succeeded_count();
    if succeeded == 0 {
        StatusCode::BAD_REQUEST
    } else if succeeded == batch.results.len() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Upload photos
///
/// Every multipart part named `file` or `files` is validated and stored on its
/// own; one bad file does not fail the others.
#[utoipa::path(
    post,
    path = "/api/v0/photos",
    tag = "photos",
    request_body(content_type = "multipart/form-data", description = "One or more parts named 'file' or 'files'"),
    responses(
        (status = 201, description = "All files uploaded", body = UploadBatchResponse),
        (status = 200, description = "Some files uploaded", body = UploadBatchResponse),
        (status = 400, description = "No file uploaded", body = UploadBatchResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse)
    )
)]
pub async fn upload_photos(
    State(lifecycle): State<PhotoLifecycleService>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let files = extract_multipart_files(multipart).await?;

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let size_bytes = file.data.len();
        let result = lifecycle
            .upload(&file.file_name, &file.content_type, size_bytes, file.data)
            .await;
        results.push(result);
    }

    let batch = UploadBatchResponse { results };
    let status = batch_status(&batch);

    tracing::info!(
        files = batch.results.len(),
        succeeded = batch.succeeded_count(),
        status = status.as_u16(),
        "Upload batch processed"
    );

    Ok((status, Json(batch)))
}
