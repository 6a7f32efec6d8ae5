use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// One row of the `photos` table.
///
/// `file_path` is the object-store key and joins the row to its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Photo {
    pub id: i64,
    pub original_file_name: String,
    pub stored_file_name: String,
    pub file_path: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
}

impl Photo {
    /// Weak entity tag for the stored bytes. Rows are immutable, so
    /// `(id, uploaded_at)` identifies one version of the content.
    pub fn etag(&self) -> String {
        format!("W/\"{}-{}\"", self.id, self.uploaded_at.timestamp_millis())
    }
}

/// Insert payload; `id` and `uploaded_at` are assigned by the metadata store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub original_file_name: String,
    pub stored_file_name: String,
    pub file_path: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl NewPhoto {
    /// Materialise the row the store would return for this payload.
    pub fn into_photo(self, id: i64, uploaded_at: DateTime<Utc>) -> Photo {
        Photo {
            id,
            original_file_name: self.original_file_name,
            stored_file_name: self.stored_file_name,
            file_path: self.file_path,
            file_size_bytes: self.file_size_bytes,
            mime_type: self.mime_type,
            width: self.width,
            height: self.height,
            uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: i64,
    pub original_file_name: String,
    pub stored_file_name: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
    /// Relative URL serving the photo bytes
    pub url: String,
}

impl PhotoResponse {
    pub fn from_photo(photo: Photo, api_prefix: &str) -> Self {
        let url = format!("{}/photos/{}/file", api_prefix, photo.id);
        Self {
            id: photo.id,
            original_file_name: photo.original_file_name,
            stored_file_name: photo.stored_file_name,
            file_size_bytes: photo.file_size_bytes,
            mime_type: photo.mime_type,
            width: photo.width,
            height: photo.height,
            uploaded_at: photo.uploaded_at,
            url,
        }
    }
}
