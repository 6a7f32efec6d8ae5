use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a single upload. Failures carry a human-readable message and
/// never a photo id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_id: Option<i64>,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl UploadResult {
    pub fn succeeded(file_name: impl Into<String>, photo_id: i64) -> Self {
        Self {
            success: true,
            photo_id: Some(photo_id),
            file_name: file_name.into(),
            error_message: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            photo_id: None,
            file_name: file_name.into(),
            error_message: Some(message.into()),
        }
    }
}

/// Response body of a (possibly multi-file) upload request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadBatchResponse {
    pub results: Vec<UploadResult>,
}

impl UploadBatchResponse {
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}
