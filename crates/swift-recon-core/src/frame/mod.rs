//! Frame-of-reference conversion between SWiFT and Reconstruct.
//!
//! # Coordinate Systems
//!
//! - **SWiFT**: origin at the top-left corner, y grows downwards, translation
//!   relative to that origin.
//! - **Reconstruct**: origin at the bottom-left corner, y grows upwards, and
//!   transforms map in the opposite direction to SWiFT's.
//!
//! # Conversion Order
//!
//! 1. Locate the bottom-left corner `(0, height)` in SWiFT's frame
//! 2. Measure how far the transform moves that corner
//! 3. Replace the translation with that movement, rounded to 5 decimals
//! 4. Flip the y axis (negate `b`, `c` and `ty`)
//! 5. Invert the matrix
//!
//! The six coefficients of the result are written with [`format_section`].
//!
//! # Examples
//!
//! ```ignore
//! use swift_recon_core::frame::{format_section, swift_to_reconstruct};
//!
//! let recon = swift_to_reconstruct(&swift, height)?;
//! println!("{}", format_section(&recon, 0));
//! ```

mod convert;
mod format;

pub use convert::{
    anchor_to_bottom_left, anchor_to_top_left, bottom_left_corner, bottom_left_delta,
    flip_y_axis, reconstruct_to_swift, round_translation, swift_to_reconstruct,
    TRANSLATION_DECIMALS,
};
pub use format::{format_coefficient, format_section};
