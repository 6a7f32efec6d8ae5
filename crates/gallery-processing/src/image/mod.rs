//! Image processing module
//!
//! Dimension probing for uploaded photos (processor).

pub mod processor;

pub use processor::{ImageDimensions, ImageProcessor};
