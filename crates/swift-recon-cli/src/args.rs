//! Command line arguments and how they become a [`ConversionConfig`].

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use swift_recon_core::{ConversionConfig, ImageHeight, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "swift-recon")]
#[command(
    version,
    about = "Convert SWiFT alignment transforms to Reconstruct's frame of reference",
    long_about = None
)]
pub struct Cli {
    /// SWiFT transform file (one `<index> a b tx c d ty` line per section)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file; new lines are appended if it already exists
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Height of the pre-aligned raw images in pixels (e.g. 24576)
    #[arg(long, value_name = "PIXELS", value_parser = parse_height)]
    pub height: Option<ImageHeight>,

    /// Take the image height from a sample raw section image
    #[arg(long, value_name = "IMAGE", conflicts_with = "height")]
    pub height_from: Option<PathBuf>,

    /// TOML run file providing input, output and image_height
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Remove the output file before converting instead of appending
    #[arg(long)]
    pub overwrite: bool,

    /// Log progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", hide = true)]
    pub debug: bool,
}

fn parse_height(s: &str) -> Result<ImageHeight, String> {
    let pixels: u32 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a whole number of pixels"))?;
    ImageHeight::new(pixels).map_err(|e| e.to_string())
}

/// True when both stdin and stdout are attached to a terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

impl Cli {
    /// Default log filter implied by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    /// Combine flags, the optional config file and, when `interactive`,
    /// prompts for anything still missing. Flags win over the config file.
    pub fn resolve(&self, interactive: bool) -> Result<ConversionConfig> {
        let base = match &self.config {
            Some(path) => Some(ConversionConfig::from_toml_file(path)?),
            None => None,
        };

        let input = match (&self.input, &base) {
            (Some(input), _) => input.clone(),
            (None, Some(base)) => base.input.clone(),
            (None, None) if interactive => prompt_input()?,
            (None, None) => bail!("No input file given. Pass INPUT or --config."),
        };

        let output = match (&self.output, &base) {
            (Some(output), _) => output.clone(),
            (None, Some(base)) => base.output.clone(),
            (None, None) => PathBuf::from(DEFAULT_OUTPUT),
        };

        let image_height = if let Some(height) = self.height {
            height
        } else if let Some(image) = &self.height_from {
            let height = ImageHeight::from_image(image)?;
            log::info!("using image height {height} from {}", image.display());
            height
        } else if let Some(base) = &base {
            base.image_height
        } else if interactive {
            prompt_height()?
        } else {
            bail!("No image height given. Pass --height, --height-from or --config.");
        };

        Ok(ConversionConfig::new(input, image_height).with_output(output))
    }
}

fn prompt_input() -> Result<PathBuf> {
    let answer = inquire::Text::new("SWiFT transform file:")
        .with_help_message("the .dat file that contains SWiFT transformations")
        .prompt()
        .context("Failed to read input path")?;
    Ok(PathBuf::from(answer.trim()))
}

fn prompt_height() -> Result<ImageHeight> {
    let pixels = inquire::CustomType::<u32>::new("Height of the pre-aligned raw images in pixels:")
        .with_help_message("e.g. 24576")
        .with_error_message("Please type a whole number of pixels")
        .prompt()
        .context("Failed to read image height")?;
    Ok(ImageHeight::new(pixels)?)
}
