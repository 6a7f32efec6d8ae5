//! Test helpers: build AppState and router for integration tests.
//!
//! Both stores are in-memory fakes, so no database or bucket is needed.
//! Run with `cargo test -p gallery-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use axum_test::TestServer;
use gallery_api::constants;
use gallery_api::setup::routes;
use gallery_api::state::AppState;
use gallery_api::{PhotoLifecycleService, UploadSettings};
use gallery_core::{BaseConfig, Config, GalleryConfig, StorageBackend};
use mocks::{MockPhotoStore, MockStorage};
use std::sync::Arc;

pub const MAX_FILE_SIZE_BYTES: usize = 1024 * 1024;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn test_config() -> Config {
    Config(Box::new(GalleryConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 5,
            request_timeout_secs: 30,
            http_concurrency_limit: 100,
            environment: "test".to_string(),
            log_format: "text".to_string(),
        },
        database_url: "postgres://localhost/gallery_test".to_string(),
        storage_backend: StorageBackend::Local,
        storage_partition: "uploads".to_string(),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: "./data/photos".to_string(),
        max_file_size_bytes: MAX_FILE_SIZE_BYTES,
        allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
        ],
    }))
}

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
    pub photos: Arc<MockPhotoStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub async fn setup_test_app() -> TestApp {
    let config = test_config();
    let storage = Arc::new(MockStorage::new());
    let photos = Arc::new(MockPhotoStore::new());

    let state = Arc::new(AppState::new(config.clone(), photos.clone(), storage.clone()));
    let router = routes::setup_routes(&config, state)
        .await
        .expect("build router");

    TestApp {
        server: TestServer::new(router.into_make_service()).expect("Failed to create test server"),
        storage,
        photos,
    }
}

/// A lifecycle service wired straight to fresh fakes.
pub fn lifecycle_service() -> (PhotoLifecycleService, Arc<MockStorage>, Arc<MockPhotoStore>) {
    let config = test_config();
    let storage = Arc::new(MockStorage::new());
    let photos = Arc::new(MockPhotoStore::new());
    let service = PhotoLifecycleService::new(
        photos.clone(),
        storage.clone(),
        UploadSettings::from_config(&config),
    );
    (service, storage, photos)
}
