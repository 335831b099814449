//! Mosaic (pixelation) primitive, delegated to the `image` crate.
//!
//! Pixelation here is nearest-neighbor resampling: shrink the image so
//! each mosaic block becomes a single pixel, then scale it back up to
//! the original size. The averaging/sampling behavior is owned entirely
//! by `image::imageops` — this module only picks the target sizes.

use image::DynamicImage;
use image::imageops::FilterType;

use crate::percentage::Percentage;

/// Pixelate a decoded image in place of detail, preserving dimensions.
///
/// A `percentage` of 1 leaves the image visually unchanged (blocks of
/// one pixel); 100 reduces it to a coarse mosaic. The output always
/// has exactly the source width and height.
#[must_use]
pub fn pixelate_image(image: &DynamicImage, percentage: Percentage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    let block = percentage.block_size(width, height);
    if block <= 1 {
        return image.clone();
    }

    // One pixel per block. max(1) guards tiny images where the block
    // size equals an axis.
    let down_w = (width / block).max(1);
    let down_h = (height / block).max(1);

    let shrunk = image.resize_exact(down_w, down_h, FilterType::Nearest);
    shrunk.resize_exact(width, height, FilterType::Nearest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::from_fn(w, h, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        }))
    }

    #[test]
    fn preserves_dimensions() {
        let img = gradient_image(100, 60);
        let out = pixelate_image(&img, Percentage::try_new(50).unwrap());
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 60);
    }

    #[test]
    fn block_of_one_is_identity() {
        let img = gradient_image(10, 10);
        let out = pixelate_image(&img, Percentage::try_new(1).unwrap());
        assert_eq!(img.to_rgba8().as_raw(), out.to_rgba8().as_raw());
    }

    #[test]
    fn large_block_flattens_detail() {
        // With a 100-pixel block on a 100x100 gradient the whole image
        // collapses to a single sampled color.
        let img = gradient_image(100, 100);
        let out = pixelate_image(&img, Percentage::try_new(100).unwrap());
        let rgba = out.to_rgba8();
        let first = *rgba.get_pixel(0, 0);
        assert!(rgba.pixels().all(|p| *p == first));
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 100);
    }

    #[test]
    fn blocks_are_uniform() {
        // Every 10x10 block of the output should hold a single color.
        let img = gradient_image(40, 40);
        let out = pixelate_image(&img, Percentage::try_new(10).unwrap())
            .to_rgba8();
        for by in 0..4 {
            for bx in 0..4 {
                let anchor = *out.get_pixel(bx * 10, by * 10);
                for dy in 0..10 {
                    for dx in 0..10 {
                        assert_eq!(
                            *out.get_pixel(bx * 10 + dx, by * 10 + dy),
                            anchor,
                            "block ({bx},{by}) is not uniform",
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn tiny_image_survives_max_percentage() {
        let img = gradient_image(3, 2);
        let out = pixelate_image(&img, Percentage::try_new(100).unwrap());
        assert_eq!(out.width(), 3);
        assert_eq!(out.height(), 2);
    }
}
