//! Upload validation rules
//!
//! Checks run in a fixed order and stop at the first failure: content type,
//! then the size ceiling, then emptiness.

use std::path::Path;

use crate::error::AppError;

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against the allow-list, ignoring case and parameters.
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types
        .iter()
        .any(|ct| normalized == ct.trim().to_lowercase())
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type '{}'. Allowed types: {}",
            content_type,
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// Validate file size against the configured ceiling (inclusive).
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

pub fn validate_not_empty(file_size: usize) -> Result<(), AppError> {
    if file_size == 0 {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }
    Ok(())
}

/// Run every upload check in order.
pub fn validate_upload(
    content_type: &str,
    file_size: usize,
    max_size: usize,
    allowed_types: &[String],
) -> Result<(), AppError> {
    validate_content_type(content_type, allowed_types)?;
    validate_file_size(file_size, max_size)?;
    validate_not_empty(file_size)
}

/// Extension of the caller's file name, with its leading dot, suitable for a
/// storage key. Returns `None` when the name has no extension or the
/// extension contains anything but ASCII alphanumerics.
pub fn storage_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", ext))
}
