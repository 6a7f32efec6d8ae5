use chrono::Utc;
use gallery_core::models::{NewPhoto, Photo};
use gallery_core::AppError;
use sqlx::{PgPool, Postgres};

/// Photo metadata repository
///
/// Rows are immutable once inserted; the only mutations are insert and remove.
#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<Photo>, AppError> {
        let photos = sqlx::query_as::<Postgres, Photo>(
            r#"
            SELECT id, original_file_name, stored_file_name, file_path,
                   file_size_bytes, mime_type, width, height, uploaded_at
            FROM photos
            ORDER BY uploaded_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select", db.record_id = id))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Photo>, AppError> {
        let photo = sqlx::query_as::<Postgres, Photo>(
            r#"
            SELECT id, original_file_name, stored_file_name, file_path,
                   file_size_bytes, mime_type, width, height, uploaded_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    #[tracing::instrument(
        skip(self, new_photo),
        fields(db.table = "photos", db.operation = "insert", storage_key = %new_photo.file_path)
    )]
    pub async fn insert(&self, new_photo: NewPhoto) -> Result<Photo, AppError> {
        let now = Utc::now();

        let photo = sqlx::query_as::<Postgres, Photo>(
            r#"
            INSERT INTO photos (
                original_file_name, stored_file_name, file_path,
                file_size_bytes, mime_type, width, height, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, original_file_name, stored_file_name, file_path,
                      file_size_bytes, mime_type, width, height, uploaded_at
            "#,
        )
        .bind(&new_photo.original_file_name)
        .bind(&new_photo.stored_file_name)
        .bind(&new_photo.file_path)
        .bind(new_photo.file_size_bytes)
        .bind(&new_photo.mime_type)
        .bind(new_photo.width)
        .bind(new_photo.height)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(photo_id = photo.id, "Photo row inserted");

        Ok(photo)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "delete", db.record_id = id))]
    pub async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
