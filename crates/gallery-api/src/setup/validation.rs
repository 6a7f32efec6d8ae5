//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use gallery_core::{Config, StorageBackend};

/// Very large per-file limits multiply into the request body limit.
const LARGE_FILE_WARNING_BYTES: usize = 100 * 1024 * 1024;

/// Validate critical configuration values
///
/// Hard errors come from `Config::validate`; this adds warnings for settings
/// that are legal but usually a mistake.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.storage_backend() == StorageBackend::Local {
        tracing::warn!(
            path = %config.local_storage_path(),
            "Local storage backend in production - photos live on this host's disk only"
        );
    }

    if config.max_file_size_bytes() > LARGE_FILE_WARNING_BYTES {
        tracing::warn!(
            max_file_size_bytes = config.max_file_size_bytes(),
            "MAX_FILE_SIZE_MB is very high - whole files are buffered in memory during upload"
        );
    }

    if config.db_max_connections() > 100 {
        tracing::warn!(
            db_max_connections = config.db_max_connections(),
            "Database max connections is very high - may exhaust database resources"
        );
    }

    Ok(())
}
