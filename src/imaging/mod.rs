//! Upload normalization: every accepted photo leaves here as a square JPEG.

mod scratch;

pub use scratch::ScratchImage;

use crate::{Error, Result, config::ImageConfig};
use image::{DynamicImage, codecs::jpeg::JpegEncoder, imageops::FilterType};
use tracing::debug;

/// MIME type of every normalized image.
pub const NORMALIZED_MIME_TYPE: &str = "image/jpeg";

/// A photo as received from the client, before any processing.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// The resized and re-encoded version of an upload.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl NormalizedImage {
    pub fn mime_type(&self) -> &'static str {
        NORMALIZED_MIME_TYPE
    }
}

/// Decodes `bytes` in any supported format, cover-fits it to
/// `max_dimension` x `max_dimension` and encodes it as baseline JPEG.
///
/// This is CPU bound; async callers should run it on the blocking pool.
pub fn normalize(bytes: &[u8], config: &ImageConfig) -> Result<NormalizedImage> {
    let format = image::guess_format(bytes).ok();
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::decode(format!("Failed to load image: {}", e)))?;

    debug!(
        "Decoded {:?} image: {}x{}",
        format,
        img.width(),
        img.height()
    );

    let side = config.max_dimension;
    let resized = img.resize_to_fill(side, side, FilterType::Lanczos3);

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| Error::decode(format!("Failed to encode image to JPEG: {}", e)))?;

    debug!("Encoded {}x{} JPEG: {} bytes", side, side, buffer.len());

    Ok(NormalizedImage {
        bytes: buffer,
        width: rgb.width(),
        height: rgb.height(),
    })
}
