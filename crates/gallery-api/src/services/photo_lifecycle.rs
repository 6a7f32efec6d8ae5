//! Photo lifecycle: upload commit with compensation, and deletion.
//!
//! Uploads write the object store first and the metadata store second. If the
//! row insert fails the object is deleted again; if that cleanup fails too the
//! object is left as an orphan and reported with `event = "upload_compensation_failed"`.
//! Deletion removes the object best-effort and the row authoritatively.

use bytes::Bytes;
use chrono::Utc;
use gallery_core::models::{NewPhoto, Photo, UploadResult};
use gallery_core::validation::{normalize_mime_type, validate_upload};
use gallery_core::{AppError, Config, ErrorMetadata};
use gallery_db::PhotoStore;
use gallery_processing::ImageProcessor;
use gallery_storage::{generate_storage_key, ByteStream, ObjectMetadata, Storage, StorageError};
use std::sync::Arc;

use crate::error::storage_error_to_app;

/// Upload rules applied before anything is written.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub partition: String,
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl UploadSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            partition: config.storage_partition().trim_matches('/').to_string(),
            max_file_size_bytes: config.max_file_size_bytes(),
            allowed_content_types: config.allowed_content_types().to_vec(),
        }
    }
}

/// Why a commit failed; drives the message reported back in `UploadResult`.
/// Causes are logged where they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommitError {
    ObjectWrite,
    MetadataWrite,
}

impl CommitError {
    fn client_message(self) -> &'static str {
        match self {
            CommitError::ObjectWrite => "Failed to store file",
            CommitError::MetadataWrite => "Failed to save photo metadata",
        }
    }
}

#[derive(Clone)]
pub struct PhotoLifecycleService {
    photos: Arc<dyn PhotoStore>,
    storage: Arc<dyn Storage>,
    processor: ImageProcessor,
    settings: UploadSettings,
}

impl PhotoLifecycleService {
    pub fn new(
        photos: Arc<dyn PhotoStore>,
        storage: Arc<dyn Storage>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            photos,
            storage,
            processor: ImageProcessor,
            settings,
        }
    }

    /// Validate and commit one upload.
    ///
    /// Never returns an error: every failure becomes `success = false` with a
    /// readable message, and no row exists afterwards.
    #[tracing::instrument(
        skip(self, content),
        fields(file_name = %file_name, content_type = %content_type, size_bytes = size_bytes)
    )]
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        size_bytes: usize,
        content: Bytes,
    ) -> UploadResult {
        if let Err(e) = validate_upload(
            content_type,
            size_bytes,
            self.settings.max_file_size_bytes,
            &self.settings.allowed_content_types,
        ) {
            tracing::debug!(error = %e, "Upload rejected by validation");
            return UploadResult::failed(file_name, e.client_message());
        }

        let start = std::time::Instant::now();
        match self
            .commit(file_name, content_type, size_bytes, content)
            .await
        {
            Ok(photo) => {
                tracing::info!(
                    photo_id = photo.id,
                    storage_key = %photo.file_path,
                    width = ?photo.width,
                    height = ?photo.height,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Photo uploaded"
                );
                UploadResult::succeeded(file_name, photo.id)
            }
            Err(e) => UploadResult::failed(file_name, e.client_message()),
        }
    }

    async fn commit(
        &self,
        file_name: &str,
        content_type: &str,
        size_bytes: usize,
        content: Bytes,
    ) -> Result<Photo, CommitError> {
        let key = generate_storage_key(&self.settings.partition, file_name);
        let dimensions = self.processor.probe_dimensions(content.clone()).await;
        let mime_type = normalize_mime_type(content_type).to_lowercase();

        self.storage
            .ensure_container(&self.settings.partition)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, partition = %self.settings.partition, "Object store container unavailable");
                CommitError::ObjectWrite
            })?;

        let mut metadata = ObjectMetadata::new();
        metadata.insert("original_filename".to_string(), file_name.to_string());
        metadata.insert("uploaded_at".to_string(), Utc::now().to_rfc3339());

        self.storage
            .put(&key.key, content, &mime_type, &metadata)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, storage_key = %key.key, "Failed to write object");
                CommitError::ObjectWrite
            })?;

        let new_photo = NewPhoto {
            original_file_name: file_name.to_string(),
            stored_file_name: key.stored_file_name.clone(),
            file_path: key.key.clone(),
            file_size_bytes: size_bytes as i64,
            mime_type,
            width: dimensions.map(|d| d.width),
            height: dimensions.map(|d| d.height),
        };

        match self.photos.insert(new_photo).await {
            Ok(photo) => Ok(photo),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    storage_key = %key.key,
                    "Failed to save photo metadata, removing stored object"
                );
                if let Err(cleanup) = self.storage.delete(&key.key).await {
                    tracing::warn!(
                        event = "upload_compensation_failed",
                        storage_key = %key.key,
                        error = %cleanup,
                        "Stored object could not be removed after metadata failure"
                    );
                }
                Err(CommitError::MetadataWrite)
            }
        }
    }

    /// Delete a photo. `Ok(false)` when no such photo exists.
    ///
    /// Object removal failures are logged as `event = "orphan_object"` and do
    /// not stop the row removal; row removal failures propagate.
    #[tracing::instrument(skip(self), fields(photo_id = photo_id))]
    pub async fn delete(&self, photo_id: i64) -> Result<bool, AppError> {
        let photo = match self.photos.get_by_id(photo_id).await? {
            Some(photo) => photo,
            None => return Ok(false),
        };

        if let Err(e) = self.storage.delete(&photo.file_path).await {
            tracing::warn!(
                event = "orphan_object",
                photo_id = photo_id,
                storage_key = %photo.file_path,
                error = %e,
                "Failed to delete stored object, removing metadata anyway"
            );
        }

        // A concurrent delete may have removed the row since the lookup.
        let removed = self.photos.remove(photo_id).await?;
        if removed {
            tracing::info!(photo_id = photo_id, storage_key = %photo.file_path, "Photo deleted");
        }

        Ok(removed)
    }

    pub async fn list(&self) -> Result<Vec<Photo>, AppError> {
        self.photos.list_all().await
    }

    pub async fn get(&self, photo_id: i64) -> Result<Option<Photo>, AppError> {
        self.photos.get_by_id(photo_id).await
    }

    /// Open the stored bytes of `photo`. A missing object is reported as
    /// not-found and left alone.
    pub async fn open_content(&self, photo: &Photo) -> Result<ByteStream, AppError> {
        match self.storage.get_stream(&photo.file_path).await {
            Ok(stream) => Ok(stream),
            Err(StorageError::NotFound(_)) => Err(missing_object(photo)),
            Err(e) => Err(storage_error_to_app(e)),
        }
    }

    /// Check that the stored bytes of `photo` are still there without
    /// reading them.
    pub async fn ensure_content(&self, photo: &Photo) -> Result<(), AppError> {
        match self.storage.exists(&photo.file_path).await {
            Ok(true) => Ok(()),
            Ok(false) | Err(StorageError::NotFound(_)) => Err(missing_object(photo)),
            Err(e) => Err(storage_error_to_app(e)),
        }
    }
}

fn missing_object(photo: &Photo) -> AppError {
    tracing::warn!(
        event = "missing_object",
        photo_id = photo.id,
        storage_key = %photo.file_path,
        "Photo row has no stored object"
    );
    AppError::NotFound("Photo file not found".to_string())
}
