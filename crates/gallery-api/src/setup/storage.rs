//! Storage setup and initialization

use anyhow::{Context, Result};
use gallery_core::Config;
use gallery_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the configured object store and make sure the upload partition exists.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to create storage backend")?;

    storage
        .ensure_container(config.storage_partition())
        .await
        .with_context(|| {
            format!(
                "Storage partition '{}' is not available",
                config.storage_partition()
            )
        })?;

    tracing::info!(
        backend = ?storage.backend_type(),
        partition = %config.storage_partition(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
