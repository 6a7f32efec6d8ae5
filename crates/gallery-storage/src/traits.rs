//! Storage abstraction trait
//!
//! This module defines the Storage trait that all object-store backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Free-form side metadata written next to an object
/// (`original_filename`, `uploaded_at`).
pub type ObjectMetadata = HashMap<String, String>;

/// Chunked object content.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The lifecycle service only ever talks to this trait, so tests can swap
/// in an in-memory implementation.
///
/// **Key format:** `{partition}/{stored_file_name}`. See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Make sure the logical container for `partition` exists and is
    /// reachable. Idempotent.
    async fn ensure_container(&self, partition: &str) -> StorageResult<()>;

    /// Write `data` under `storage_key`, replacing nothing: keys are unique.
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()>;

    /// Read a whole object into memory
    async fn get(&self, storage_key: &str) -> StorageResult<Bytes>;

    /// Read an object as a stream of chunks. Missing objects yield
    /// `StorageError::NotFound` before any chunk is produced.
    async fn get_stream(&self, storage_key: &str) -> StorageResult<ByteStream>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
