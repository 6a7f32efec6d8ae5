//! Data models for the application
//!
//! Photo records as stored in the metadata table, the payloads used to create
//! them, and the shapes returned over HTTP.

mod photo;
mod upload;

pub use photo::*;
pub use upload::*;
