//! Shared key generation for storage backends.
//!
//! Key format: `{partition}/{uuid}{.ext}`. The caller's file name only
//! contributes its extension.

use crate::traits::{StorageError, StorageResult};
use gallery_core::validation::storage_extension;
use uuid::Uuid;

/// A freshly generated object name and the full key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    pub stored_file_name: String,
    pub key: String,
}

/// Generate a unique storage key for an upload.
///
/// The random part is a UUID v4, so keys never collide and are never reused.
pub fn generate_storage_key(partition: &str, original_filename: &str) -> StorageKey {
    let ext = storage_extension(original_filename).unwrap_or_default();
    let stored_file_name = format!("{}{}", Uuid::new_v4(), ext);
    let partition = partition.trim_matches('/');
    let key = format!("{}/{}", partition, stored_file_name);

    StorageKey {
        stored_file_name,
        key,
    }
}

/// Reject keys that could escape the container.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
