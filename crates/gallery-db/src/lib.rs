//! Gallery Database Layer
//!
//! This crate provides the photo metadata repository and the `PhotoStore`
//! trait the lifecycle service depends on.

// Module declarations
pub mod db;
pub mod photo_store;

// Re-exports
pub use db::PhotoRepository;
pub use photo_store::PhotoStore;
