//! Gallery Storage Library
//!
//! This crate provides the object-store abstraction for photo bytes and its
//! implementations for S3-compatible services and the local filesystem.
//!
//! # Storage key format
//!
//! Every backend uses the same key layout: `{partition}/{uuid}{.ext}`, where
//! the partition is the configured logical container (default `uploads`).
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use gallery_core::StorageBackend;
pub use keys::{generate_storage_key, StorageKey};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteStream, ObjectMetadata, Storage, StorageError, StorageResult};
