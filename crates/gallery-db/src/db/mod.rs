//! Database repositories for data access layer
//!
//! One repository per table; each provides plain CRUD over a `PgPool`.

pub mod photo;

pub use photo::PhotoRepository;
