//! Photo API integration tests.
//!
//! Run with: `cargo test -p gallery-api --test photos_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use chrono::{Duration, Utc};
use gallery_core::models::Photo;
use helpers::{api_path, fixtures, setup_test_app, MAX_FILE_SIZE_BYTES};
use serde_json::Value;
use std::sync::atomic::Ordering;

fn file_part(data: Vec<u8>, file_name: &str, mime: &str) -> Part {
    Part::bytes(data).file_name(file_name).mime_type(mime)
}

fn single_file(data: Vec<u8>, file_name: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(data, file_name, mime))
}

fn seeded_photo(id: i64, key: &str, uploaded_at: chrono::DateTime<Utc>) -> Photo {
    Photo {
        id,
        original_file_name: format!("photo-{id}.png"),
        stored_file_name: key.rsplit('/').next().unwrap_or(key).to_string(),
        file_path: key.to_string(),
        file_size_bytes: 3,
        mime_type: "image/png".to_string(),
        width: None,
        height: None,
        uploaded_at,
    }
}

#[tokio::test]
async fn test_upload_single_photo_returns_created() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(64, 48), "cat.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let result = &body["results"][0];
    assert_eq!(result["success"], true);
    assert_eq!(result["fileName"], "cat.png");
    assert_eq!(result["photoId"], 1);
    assert!(result.get("errorMessage").is_none());

    let rows = app.photos.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.original_file_name, "cat.png");
    assert_eq!(row.mime_type, "image/png");
    assert_eq!((row.width, row.height), (Some(64), Some(48)));
    assert!(row.file_path.starts_with("uploads/"));
    assert!(row.file_path.ends_with(".png"));
    assert!(!row.stored_file_name.contains("cat"));

    let object = app.storage.object(&row.file_path).expect("object stored");
    assert_eq!(object.content_type, "image/png");
    assert_eq!(object.metadata.get("original_filename").map(String::as_str), Some("cat.png"));
    assert!(object.metadata.contains_key("uploaded_at"));
    assert_eq!(app.storage.containers(), vec!["uploads".to_string()]);
}

#[tokio::test]
async fn test_upload_jpeg_records_dimensions() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::jpeg(320, 200), "beach.JPG", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 201);

    let photo: Value = app.client().get(&api_path("/photos/1")).await.json();
    assert_eq!(photo["width"], 320);
    assert_eq!(photo["height"], 200);
    assert_eq!(photo["mimeType"], "image/jpeg");
    assert_eq!(photo["url"], "/api/v0/photos/1/file");
    assert!(photo.get("filePath").is_none());
    assert!(photo["storedFileName"].as_str().unwrap().ends_with(".JPG"));
}

#[tokio::test]
async fn test_upload_undecodable_image_still_succeeds_without_dimensions() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::not_an_image(), "broken.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 201);

    let photo: Value = app.client().get(&api_path("/photos/1")).await.json();
    assert!(photo.get("width").is_none());
    assert!(photo.get("height").is_none());
}

#[tokio::test]
async fn test_upload_multiple_files_partial_success() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("files", file_part(fixtures::png(8, 8), "ok.png", "image/png"))
        .add_part("files", file_part(b"%PDF-1.4".to_vec(), "doc.pdf", "application/pdf"))
        .add_part("files", file_part(Vec::new(), "empty.png", "image/png"));

    let response = app.client().post(&api_path("/photos")).multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[1]["success"], false);
    assert!(results[1]["errorMessage"]
        .as_str()
        .unwrap()
        .contains("Invalid content type"));
    assert_eq!(results[2]["success"], false);
    assert_eq!(results[2]["errorMessage"], "File is empty");

    assert_eq!(app.photos.row_count(), 1);
    assert_eq!(app.storage.object_count(), 1);
}

#[tokio::test]
async fn test_upload_all_failed_returns_bad_request() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("file", file_part(b"hello".to_vec(), "a.txt", "text/plain"))
        .add_part("file", file_part(b"world".to_vec(), "b.txt", "text/plain"));

    let response = app.client().post(&api_path("/photos")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(app.photos.row_count(), 0);
    assert_eq!(app.storage.object_count(), 0);
}

#[tokio::test]
async fn test_upload_without_file_part_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("caption", "no file here");
    let response = app.client().post(&api_path("/photos")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_too_many_files_is_rejected() {
    let app = setup_test_app().await;

    let mut form = MultipartForm::new();
    for i in 0..11 {
        form = form.add_part("files", file_part(fixtures::png(2, 2), &format!("{i}.png"), "image/png"));
    }

    let response = app.client().post(&api_path("/photos")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.photos.row_count(), 0);
    assert_eq!(app.storage.object_count(), 0);
}

#[tokio::test]
async fn test_upload_content_type_check_ignores_case_and_parameters() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "IMAGE/PNG; charset=binary"))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(app.photos.rows()[0].mime_type, "image/png");
}

#[tokio::test]
async fn test_upload_oversize_file_fails_validation() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(vec![0u8; MAX_FILE_SIZE_BYTES + 1], "big.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["results"][0]["success"], false);
    assert!(body["results"][0]["errorMessage"]
        .as_str()
        .unwrap()
        .contains("exceeds maximum allowed size"));
    assert_eq!(app.storage.object_count(), 0);
}

#[tokio::test]
async fn test_upload_body_over_limit_is_payload_too_large() {
    let app = setup_test_app().await;

    let oversized = vec![0u8; MAX_FILE_SIZE_BYTES * 12];
    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(oversized, "huge.png", "image/png"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(app.photos.row_count(), 0);
}

#[tokio::test]
async fn test_upload_object_write_failure_reports_failure() {
    let app = setup_test_app().await;
    app.storage.fail_put.store(true, Ordering::SeqCst);

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["results"][0]["errorMessage"], "Failed to store file");
    assert_eq!(app.photos.row_count(), 0);
}

#[tokio::test]
async fn test_upload_metadata_failure_removes_stored_object() {
    let app = setup_test_app().await;
    app.photos.fail_insert.store(true, Ordering::SeqCst);

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["results"][0]["errorMessage"], "Failed to save photo metadata");
    assert_eq!(app.storage.object_count(), 0);
}

#[tokio::test]
async fn test_list_photos_newest_first() {
    let app = setup_test_app().await;
    let now = Utc::now();
    app.photos.seed(seeded_photo(1, "uploads/a.png", now - Duration::hours(2)));
    app.photos.seed(seeded_photo(2, "uploads/b.png", now));
    app.photos.seed(seeded_photo(3, "uploads/c.png", now - Duration::hours(1)));
    app.photos.seed(seeded_photo(4, "uploads/d.png", now));

    let response = app.client().get(&api_path("/photos")).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 2, 3, 1]);
}

#[tokio::test]
async fn test_list_photos_empty() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/photos")).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_get_unknown_photo_is_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/photos/42")).expect_failure().await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_download_photo_headers_and_bytes() {
    let app = setup_test_app().await;
    let png = fixtures::png(16, 16);

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(png.clone(), "sunset.png", "image/png"))
        .await;

    let row = app.photos.rows().remove(0);
    let response = app.client().get(&api_path("/photos/1/file")).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.header("cache-control"),
        "public, max-age=31536000, immutable"
    );
    assert_eq!(response.header("etag").to_str().unwrap(), row.etag());
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("inline; filename=\"sunset.png\""));
    assert_eq!(response.as_bytes().to_vec(), png);
}

#[tokio::test]
async fn test_download_with_matching_etag_is_not_modified() {
    let app = setup_test_app().await;

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;
    let etag = app.photos.rows()[0].etag();

    let response = app
        .client()
        .get(&api_path("/photos/1/file"))
        .add_header("If-None-Match", etag.clone())
        .await;

    assert_eq!(response.status_code(), 304);
    assert_eq!(response.header("etag").to_str().unwrap(), etag);
    assert!(response.as_bytes().is_empty());

    let stale = app
        .client()
        .get(&api_path("/photos/1/file"))
        .add_header("If-None-Match", "W/\"1-0\"")
        .await;
    assert_eq!(stale.status_code(), 200);
}

#[tokio::test]
async fn test_download_missing_object_is_not_found() {
    let app = setup_test_app().await;

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;
    let key = app.photos.rows()[0].file_path.clone();
    app.storage.remove_object(&key);

    let response = app
        .client()
        .get(&api_path("/photos/1/file"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
    // The row is reported, not repaired
    assert_eq!(app.photos.row_count(), 1);
}

#[tokio::test]
async fn test_conditional_download_of_missing_object_is_not_found() {
    let app = setup_test_app().await;

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;
    let row = app.photos.rows()[0].clone();
    app.storage.remove_object(&row.file_path);

    let response = app
        .client()
        .get(&api_path("/photos/1/file"))
        .add_header("If-None-Match", row.etag())
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(app.photos.row_count(), 1);
}

#[tokio::test]
async fn test_download_unknown_photo_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/photos/9/file"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_photo_removes_row_and_object() {
    let app = setup_test_app().await;

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;
    let key = app.photos.rows()[0].file_path.clone();

    let response = app.client().delete(&api_path("/photos/1")).await;

    assert_eq!(response.status_code(), 204);
    assert_eq!(app.photos.row_count(), 0);
    assert!(!app.storage.has_object(&key));

    let again = app
        .client()
        .delete(&api_path("/photos/1"))
        .expect_failure()
        .await;
    assert_eq!(again.status_code(), 404);
}

#[tokio::test]
async fn test_delete_survives_object_delete_failure() {
    let app = setup_test_app().await;

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;
    let key = app.photos.rows()[0].file_path.clone();
    app.storage.fail_delete.store(true, Ordering::SeqCst);

    let response = app.client().delete(&api_path("/photos/1")).await;

    assert_eq!(response.status_code(), 204);
    assert_eq!(app.photos.row_count(), 0);
    // Orphaned object is left behind
    assert!(app.storage.has_object(&key));
}

#[tokio::test]
async fn test_delete_metadata_failure_is_server_error() {
    let app = setup_test_app().await;

    app.client()
        .post(&api_path("/photos"))
        .multipart(single_file(fixtures::png(4, 4), "x.png", "image/png"))
        .await;
    app.photos.fail_remove.store(true, Ordering::SeqCst);

    let response = app
        .client()
        .delete(&api_path("/photos/1"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert_eq!(body["error"], "Failed to access photo catalog");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_operational_routes() {
    let app = setup_test_app().await;

    assert_eq!(app.client().get("/live").await.status_code(), 200);
    assert_eq!(app.client().get("/ready").await.status_code(), 200);

    let health: Value = app.client().get("/health").await.json();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "healthy");
    assert_eq!(health["storage"], "healthy");

    let spec: Value = app.client().get("/api/openapi.json").await.json();
    assert!(spec["paths"]["/api/v0/photos/{id}/file"].is_object());
}
