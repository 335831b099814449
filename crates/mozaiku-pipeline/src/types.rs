//! Shared types for the mozaiku pixelation pipeline.

use serde::{Deserialize, Serialize};

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Result of pixelating an image.
///
/// The encoded output is always PNG regardless of the input format.
/// `dimensions` describes the *source* image; pixelation never changes
/// the pixel grid, only the detail within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixelated {
    /// PNG-encoded pixelated image.
    pub png: Vec<u8>,
    /// Dimensions of the source image (identical for the output).
    pub dimensions: Dimensions,
}

/// Errors that can occur while pixelating an image.
#[derive(Debug, thiserror::Error)]
pub enum PixelateError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Failed to re-encode the pixelated image as PNG.
    ///
    /// Kept as a `Display` string rather than wrapping
    /// `image::ImageError` so decode and encode failures stay
    /// distinguishable by variant.
    #[error("failed to encode pixelated image: {0}")]
    ImageEncode(String),

    /// The requested percentage was not an integer in `[1, 100]`.
    #[error("percentage must be a number from 1 to 100, got {0:?}")]
    InvalidPercentage(String),
}
