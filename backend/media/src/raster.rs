//! Offscreen raster and JPEG encoding for camera frames.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ExtendedColorType, ImageEncoder, ImageResult, Rgba, RgbaImage};

/// Raster width used when the stream reports none.
pub const DEFAULT_WIDTH: u32 = 640;

/// Raster height used when the stream reports none.
pub const DEFAULT_HEIGHT: u32 = 480;

/// JPEG quality on the encoder's 1-100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Pick the raster size for a stream. Each axis falls back on its own.
pub fn raster_size(reported: (u32, u32), fallback: (u32, u32)) -> (u32, u32) {
    let width = if reported.0 == 0 { fallback.0 } else { reported.0 };
    let height = if reported.1 == 0 { fallback.1 } else { reported.1 };
    (width, height)
}

/// Draw `frame` at the origin of an opaque black raster of the given size.
///
/// Parts of the frame outside the raster are clipped; uncovered raster
/// pixels stay black.
pub fn draw_frame(frame: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    imageops::replace(&mut canvas, &frame.to_rgba8(), 0, 0);
    canvas
}

/// Encode a raster as baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(canvas: RgbaImage, quality: u8) -> ImageResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    Ok(buf)
}
