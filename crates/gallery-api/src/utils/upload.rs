//! Common utilities for file upload handlers

use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use gallery_core::AppError;

use crate::constants::MAX_FILES_PER_REQUEST;

/// One file part taken from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

fn multipart_error(err: axum::extract::multipart::MultipartError, what: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Request body too large: {}", err.body_text()))
    } else {
        AppError::InvalidInput(format!("Failed to read {}: {}", what, err.body_text()))
    }
}

/// Extract every file part named "file" or "files" from a multipart form.
/// Other fields are ignored. At least one file is required.
pub async fn extract_multipart_files(
    mut multipart: Multipart,
) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();
        if field_name != "file" && field_name != "files" {
            continue;
        }

        if files.len() == MAX_FILES_PER_REQUEST {
            return Err(AppError::InvalidInput(format!(
                "Too many files; at most {} files per request",
                MAX_FILES_PER_REQUEST
            )));
        }

        let file_name = field
            .file_name()
            .map(|s: &str| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = field
            .content_type()
            .map(|s: &str| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "file data"))?;

        files.push(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }

    if files.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    Ok(files)
}

/// Make an original file name safe to echo in a quoted header parameter.
/// Directory components are dropped; anything outside a conservative ASCII
/// set becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '.' || c == ' ').is_empty() {
        return "file".to_string();
    }

    sanitized
}
