//! Thumbnail generation.
//!
//! Thumbnails are always baseline JPEG, no larger than
//! [`THUMBNAIL_MAX_DIMENSION`] on either side.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use thiserror::Error;

/// Bounding box edge, in pixels.
pub const THUMBNAIL_MAX_DIMENSION: u32 = 300;
pub const THUMBNAIL_JPEG_QUALITY: u8 = 85;
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("failed to encode thumbnail: {0}")]
    Encode(#[source] ImageError),
}

/// Decode `data`, shrink it to fit the thumbnail box and re-encode as JPEG.
///
/// Multi-frame inputs contribute their first frame only.
pub fn make_thumbnail(data: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    let img = image::load_from_memory(data).map_err(ThumbnailError::Decode)?;
    let img = flatten(img);

    let (width, height) = fit_within(img.width(), img.height(), THUMBNAIL_MAX_DIMENSION);
    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::CatmullRom)
    };

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, THUMBNAIL_JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(ThumbnailError::Encode)?;
    Ok(out)
}

/// Reduce to a color mode the JPEG encoder accepts.
///
/// Alpha is dropped, not composited onto a background.
fn flatten(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Scale `(width, height)` down to fit a `max`×`max` box, keeping the aspect
/// ratio. Images already inside the box are returned unchanged.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = f64::min(
        f64::from(max) / f64::from(width),
        f64::from(max) / f64::from(height),
    );
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}
