//! API constants
//!
//! Every photo route lives under a single versioned prefix.

/// Current API version segment
pub const API_VERSION: &str = "v0";

/// Versioned prefix used for all photo routes
pub const API_PREFIX: &str = "/api/v0";

/// Maximum number of file parts accepted in one upload request
pub const MAX_FILES_PER_REQUEST: usize = 10;

/// Cache directive for photo bytes. Rows never change after upload.
pub const PHOTO_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
