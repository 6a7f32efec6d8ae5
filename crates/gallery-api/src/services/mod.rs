//! Business logic services
//!
//! Keeps handler logic thin and allows testing without HTTP.

pub mod photo_lifecycle;
