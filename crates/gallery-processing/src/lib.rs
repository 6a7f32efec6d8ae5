//! Gallery Processing Library
//!
//! Image inspection for uploads. The gallery stores originals untouched, so
//! the only processing is reading pixel dimensions.

pub mod image;

pub use crate::image::{ImageDimensions, ImageProcessor};
