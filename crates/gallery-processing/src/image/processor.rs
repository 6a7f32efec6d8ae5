//! Image processor - dimension probing

use bytes::Bytes;
use image::GenericImageView;
use image::ImageReader;
use std::io::Cursor;

/// Pixel dimensions as stored in the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode `data` (format guessed from content) and return its size.
    /// Anything that fails to decode yields `None`.
    pub fn get_dimensions(&self, data: &[u8]) -> Option<(u32, u32)> {
        let cursor = Cursor::new(data);
        let reader = ImageReader::new(cursor).with_guessed_format().ok()?;
        let img = reader.decode().ok()?;
        Some(img.dimensions())
    }

    /// Probe dimensions on the blocking pool.
    ///
    /// Decode errors, panics inside the decoder, and join failures all
    /// collapse to `None`; the caller proceeds without dimensions.
    pub async fn probe_dimensions(&self, data: Bytes) -> Option<ImageDimensions> {
        let processor = *self;
        let size_bytes = data.len();
        let result = tokio::task::spawn_blocking(move || processor.get_dimensions(&data)).await;

        let (width, height) = match result {
            Ok(Some(dims)) => dims,
            Ok(None) => {
                tracing::debug!(size_bytes, "Could not decode image, storing without dimensions");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, size_bytes, "Dimension probe task failed");
                return None;
            }
        };

        match (i32::try_from(width), i32::try_from(height)) {
            (Ok(width), Ok(height)) => Some(ImageDimensions { width, height }),
            _ => None,
        }
    }
}
