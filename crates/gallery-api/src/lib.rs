//! Gallery API Library
//!
//! This crate provides the HTTP API handlers, the photo lifecycle service, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::photo_lifecycle::{PhotoLifecycleService, UploadSettings};
pub use state::AppState;
