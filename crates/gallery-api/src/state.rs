//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers can extract only what they need
//! via Axum's `FromRef`. Both stores sit behind traits, so the whole router can
//! run against in-memory fakes.

use crate::services::photo_lifecycle::{PhotoLifecycleService, UploadSettings};
use axum::extract::FromRef;
use gallery_core::Config;
use gallery_db::PhotoStore;
use gallery_storage::Storage;
use std::sync::Arc;

/// Metadata store handle.
#[derive(Clone)]
pub struct DbState {
    pub photos: Arc<dyn PhotoStore>,
}

/// Object store handle and the upload rules applied in front of it.
#[derive(Clone)]
pub struct MediaConfig {
    pub storage: Arc<dyn Storage>,
    pub upload: UploadSettings,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub media: MediaConfig,
    pub lifecycle: PhotoLifecycleService,
}

impl AppState {
    pub fn new(config: Config, photos: Arc<dyn PhotoStore>, storage: Arc<dyn Storage>) -> Self {
        let upload = UploadSettings::from_config(&config);
        let lifecycle = PhotoLifecycleService::new(photos.clone(), storage.clone(), upload.clone());

        Self {
            config,
            db: DbState { photos },
            media: MediaConfig { storage, upload },
            lifecycle,
        }
    }
}

impl FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl FromRef<Arc<AppState>> for MediaConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.media.clone()
    }
}

impl FromRef<Arc<AppState>> for PhotoLifecycleService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.lifecycle.clone()
    }
}
