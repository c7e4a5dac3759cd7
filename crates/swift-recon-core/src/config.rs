//! Run parameters for a conversion.
//!
//! A run needs three things: the SWiFT transform file, the Reconstruct file
//! to append to, and the pixel height of the raw section images. They can
//! come from any front end; this module also reads them from a TOML file:
//!
//! ```toml
//! input = "CSYSR_SWiFT_transforms.dat"
//! output = "recon_c_afm.dat"   # optional
//! image_height = 24576
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{ImageHeight, ZeroImageHeight};

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT: &str = "recon_c_afm.dat";

/// Errors raised while assembling run parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has wrong fields.
    #[error("invalid config file {}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The reference image could not be probed for its dimensions.
    #[error("cannot read image dimensions from {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A zero height was given or found.
    #[error(transparent)]
    ImageHeight(#[from] ZeroImageHeight),
}

/// Everything needed for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    /// SWiFT transform file to read.
    pub input: PathBuf,
    /// Reconstruct transform file to append to.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Height of the pre-alignment raw images.
    pub image_height: ImageHeight,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl ConversionConfig {
    /// Create a config writing to [`DEFAULT_OUTPUT`].
    pub fn new(input: impl Into<PathBuf>, image_height: ImageHeight) -> Self {
        Self {
            input: input.into(),
            output: default_output(),
            image_height,
        }
    }

    /// Replace the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Parse a config from TOML text.
    ///
    /// Relative paths are kept as written. `origin` only labels errors.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Syntax {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config from a TOML file.
    ///
    /// Relative `input` and `output` paths are resolved against the
    /// directory holding the config file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents, path)?;

        if let Some(base) = path.parent() {
            config.input = base.join(&config.input);
            config.output = base.join(&config.output);
        }
        Ok(config)
    }
}

impl ImageHeight {
    /// Read the height of a sample raw section image.
    ///
    /// Only the image header is decoded. TIFF, PNG and JPEG are supported.
    pub fn from_image(path: &Path) -> Result<Self, ConfigError> {
        let (_, height) = image::image_dimensions(path).map_err(|source| ConfigError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(height)?)
    }
}
