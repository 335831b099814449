//! mozaiku-pipeline: Pure pixelation pipeline (sans-IO).
//!
//! Decodes raw image bytes, applies the mosaic primitive from the
//! `image` crate, and re-encodes the result as PNG:
//! decode -> pixelate -> encode.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. All filesystem and HTTP
//! interaction lives in `mozaiku-server`.

pub mod mosaic;
pub mod percentage;
pub mod types;

use std::io::Cursor;

use image::ImageFormat;

pub use percentage::{MAX_PERCENTAGE, MIN_PERCENTAGE, Percentage};
pub use types::{Dimensions, Pixelated, PixelateError};

/// Pixelate an encoded image.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP) and a validated
/// percentage, then produces a [`Pixelated`] containing the
/// PNG-encoded mosaic and the source dimensions. Pixelation never
/// changes the reported width or height.
///
/// # Errors
///
/// Returns [`PixelateError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PixelateError::ImageDecode`] if the image format is
/// unrecognized, and [`PixelateError::ImageEncode`] if the PNG
/// re-encode fails.
pub fn pixelate(image_bytes: &[u8], percentage: Percentage) -> Result<Pixelated, PixelateError> {
    if image_bytes.is_empty() {
        return Err(PixelateError::EmptyInput);
    }

    let decoded = image::load_from_memory(image_bytes)?;
    let dimensions = Dimensions {
        width: decoded.width(),
        height: decoded.height(),
    };

    let mosaic = mosaic::pixelate_image(&decoded, percentage);

    let mut png = Vec::new();
    mosaic
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PixelateError::ImageEncode(e.to_string()))?;

    Ok(Pixelated { png, dimensions })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode a small solid-color PNG for use as request payload.
    fn solid_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([90, 120, 40, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn pixelate_empty_input() {
        let result = pixelate(&[], Percentage::try_new(50).unwrap());
        assert!(matches!(result, Err(PixelateError::EmptyInput)));
    }

    #[test]
    fn pixelate_corrupt_input() {
        let result = pixelate(&[0xFF, 0x00], Percentage::try_new(50).unwrap());
        assert!(matches!(result, Err(PixelateError::ImageDecode(_))));
    }

    #[test]
    fn pixelate_reports_source_dimensions() {
        let png = solid_png(100, 100);
        let result = pixelate(&png, Percentage::try_new(50).unwrap()).unwrap();
        assert_eq!(
            result.dimensions,
            Dimensions {
                width: 100,
                height: 100
            },
        );
    }

    #[test]
    fn pixelate_output_is_decodable_png() {
        let png = solid_png(64, 48);
        let result = pixelate(&png, Percentage::try_new(25).unwrap()).unwrap();
        let reloaded = image::load_from_memory(&result.png).unwrap();
        assert_eq!(reloaded.width(), 64);
        assert_eq!(reloaded.height(), 48);
    }

    #[test]
    fn pixelate_accepts_jpeg_input() {
        let img = image::RgbImage::from_pixel(30, 20, image::Rgb([200, 10, 10]));
        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut Cursor::new(&mut jpeg))
            .encode_image(&img)
            .unwrap();

        let result = pixelate(&jpeg, Percentage::try_new(10).unwrap()).unwrap();
        assert_eq!(
            result.dimensions,
            Dimensions {
                width: 30,
                height: 20
            },
        );
    }
}
