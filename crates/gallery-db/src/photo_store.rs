//! Repository trait abstraction for the photo metadata table
//!
//! Services depend on this trait rather than on `PhotoRepository` directly,
//! which keeps them testable without a database.

use async_trait::async_trait;
use gallery_core::models::{NewPhoto, Photo};
use gallery_core::AppError;

use crate::db::PhotoRepository;

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// All photos, newest first
    async fn list_all(&self) -> Result<Vec<Photo>, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Photo>, AppError>;

    /// Insert a row; the store assigns `id` and `uploaded_at`.
    async fn insert(&self, new_photo: NewPhoto) -> Result<Photo, AppError>;

    /// Remove a row. Returns `false` when no row had that id.
    async fn remove(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap connectivity probe used by readiness checks
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
impl PhotoStore for PhotoRepository {
    async fn list_all(&self) -> Result<Vec<Photo>, AppError> {
        PhotoRepository::list_all(self).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Photo>, AppError> {
        PhotoRepository::get_by_id(self, id).await
    }

    async fn insert(&self, new_photo: NewPhoto) -> Result<Photo, AppError> {
        PhotoRepository::insert(self, new_photo).await
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        PhotoRepository::remove(self, id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        PhotoRepository::ping(self).await
    }
}
