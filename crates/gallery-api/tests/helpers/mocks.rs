//! In-memory fakes for the two store traits, with failure injection.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures::stream;
use gallery_core::models::{NewPhoto, Photo};
use gallery_core::{AppError, StorageBackend};
use gallery_db::PhotoStore;
use gallery_storage::{ByteStream, ObjectMetadata, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub metadata: ObjectMetadata,
}

/// Object store that keeps everything in a map.
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    containers: Mutex<Vec<String>>,
    pub fail_put: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_ensure: AtomicBool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    /// Drop an object behind the service's back.
    pub fn remove_object(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    pub fn containers(&self) -> Vec<String> {
        self.containers.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn ensure_container(&self, partition: &str) -> StorageResult<()> {
        if self.fail_ensure.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError("container unavailable".to_string()));
        }
        let mut containers = self.containers.lock().unwrap();
        if !containers.iter().any(|c| c == partition) {
            containers.push(partition.to_string());
        }
        Ok(())
    }

    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected put failure".to_string()));
        }
        self.objects.lock().unwrap().insert(
            storage_key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                metadata: metadata.clone(),
            },
        );
        Ok(())
    }

    async fn get(&self, storage_key: &str) -> StorageResult<Bytes> {
        self.object(storage_key)
            .map(|o| o.data)
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn get_stream(&self, storage_key: &str) -> StorageResult<ByteStream> {
        let data = self.get(storage_key).await?;
        // Two chunks, so callers really consume a stream
        let mid = data.len() / 2;
        let chunks = vec![Ok(data.slice(..mid)), Ok(data.slice(mid..))];
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.has_object(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("injected delete failure".to_string()));
        }
        self.objects.lock().unwrap().remove(storage_key);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Metadata store backed by a vector; ids are assigned sequentially.
pub struct MockPhotoStore {
    rows: Mutex<Vec<Photo>>,
    next_id: AtomicI64,
    pub fail_insert: AtomicBool,
    pub fail_remove: AtomicBool,
    pub fail_get: AtomicBool,
}

impl Default for MockPhotoStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_insert: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
            fail_get: AtomicBool::new(false),
        }
    }
}

impl MockPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Photo> {
        self.rows.lock().unwrap().clone()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Insert a row directly, bypassing the lifecycle service.
    pub fn seed(&self, photo: Photo) {
        self.rows.lock().unwrap().push(photo);
    }
}

#[async_trait]
impl PhotoStore for MockPhotoStore {
    async fn list_all(&self) -> Result<Vec<Photo>, AppError> {
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Photo>, AppError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, new_photo: NewPhoto) -> Result<Photo, AppError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let photo = new_photo.into_photo(id, Utc::now());
        self.rows.lock().unwrap().push(photo.clone());
        Ok(photo)
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
