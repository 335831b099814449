//! Validated pixelation percentage.
//!
//! The percentage doubles as the mosaic block size: 1 is barely
//! visible, 100 collapses the shorter axis of most images into a
//! handful of blocks. Both the upload form and the HTTP endpoint
//! receive it as a string, so parsing lives here too.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::PixelateError;

/// Inclusive lower bound for a valid percentage.
pub const MIN_PERCENTAGE: i64 = 1;

/// Inclusive upper bound for a valid percentage.
pub const MAX_PERCENTAGE: i64 = 100;

/// A pixelation intensity in `[1, 100]`, validated at construction.
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Percentage(u8);

impl Percentage {
    /// Create a percentage from an integer.
    ///
    /// # Errors
    ///
    /// Returns [`PixelateError::InvalidPercentage`] if `value` is
    /// outside `[1, 100]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(value: i64) -> Result<Self, PixelateError> {
        if (MIN_PERCENTAGE..=MAX_PERCENTAGE).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PixelateError::InvalidPercentage(value.to_string()))
        }
    }

    /// Parse a string-encoded percentage, as received from a form
    /// field or the `pixelSize` multipart field.
    ///
    /// # Errors
    ///
    /// Returns [`PixelateError::InvalidPercentage`] if `raw` is not an
    /// integer in `[1, 100]`.
    pub fn parse(raw: &str) -> Result<Self, PixelateError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| PixelateError::InvalidPercentage(raw.to_string()))
            .and_then(Self::try_new)
    }

    /// The validated value as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The mosaic block size in pixels for an image with the given
    /// dimensions.
    ///
    /// The percentage maps directly to a block edge length, clamped so
    /// at least one block fits on the shorter axis.
    #[must_use]
    pub fn block_size(self, width: u32, height: u32) -> u32 {
        u32::from(self.0).min(width.min(height).max(1))
    }
}

impl TryFrom<i64> for Percentage {
    type Error = PixelateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for i64 {
    fn from(value: Percentage) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
