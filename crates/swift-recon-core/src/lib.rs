//! swift-recon Core - SWiFT to Reconstruct transform conversion
//!
//! This crate converts the per-section affine alignment transforms written by
//! SWiFT (`c_afm` files) into the frame of reference Reconstruct expects,
//! and writes them in Reconstruct's six-coefficient line format.
//!
//! # Module Structure
//!
//! - `affine` - 2D affine transforms and their inverse
//! - `parse` - Reading SWiFT transform lines
//! - `frame` - The frame-of-reference conversion and output formatting
//! - `series` - Converting a whole file, section by section
//! - `config` - Run parameters
//!
//! # Usage
//!
//! ```ignore
//! use swift_recon_core::{convert_file, ConversionConfig, ImageHeight};
//!
//! let config = ConversionConfig::new("swift.dat", ImageHeight::new(24576)?);
//! let summary = convert_file(&config)?;
//! println!("{} sections written", summary.sections);
//! ```

pub mod affine;
pub mod config;
pub mod frame;
pub mod parse;
pub mod series;
mod types;

pub use affine::{AffineTransform, ComputationError};
pub use config::{ConfigError, ConversionConfig, DEFAULT_OUTPUT};
pub use frame::{format_section, reconstruct_to_swift, swift_to_reconstruct};
pub use parse::{parse_line, ParseError};
pub use series::{
    convert_file, convert_line, convert_series, remove_existing_output, write_series,
    ConversionSummary, ConvertError,
};
pub use types::{ImageHeight, SectionIndex, ZeroImageHeight};
