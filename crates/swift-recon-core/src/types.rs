//! Shared value types.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 0-based position of a section within a transform file.
pub type SectionIndex = usize;

/// Rejected image height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("image height must be a positive number of pixels")]
pub struct ZeroImageHeight;

/// Pixel height of the raw, pre-alignment section images.
///
/// Always positive. The same height applies to every section of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ImageHeight(NonZeroU32);

impl ImageHeight {
    /// Create a height, rejecting zero.
    pub fn new(pixels: u32) -> Result<Self, ZeroImageHeight> {
        NonZeroU32::new(pixels).map(Self).ok_or(ZeroImageHeight)
    }

    /// Height in pixels.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Height in pixels as a float, for matrix arithmetic.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0.get())
    }
}

impl TryFrom<u32> for ImageHeight {
    type Error = ZeroImageHeight;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageHeight> for u32 {
    fn from(height: ImageHeight) -> Self {
        height.get()
    }
}

impl fmt::Display for ImageHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}
