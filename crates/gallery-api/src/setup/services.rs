//! Repository and service wiring

use gallery_core::Config;
use gallery_db::PhotoRepository;
use gallery_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::state::AppState;

/// Build the application state from the connected stores.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let photos = Arc::new(PhotoRepository::new(pool));
    let state = AppState::new(config.clone(), photos, storage);

    tracing::info!(
        partition = %state.media.upload.partition,
        max_file_size_bytes = state.media.upload.max_file_size_bytes,
        "Photo lifecycle service initialized"
    );

    Arc::new(state)
}
