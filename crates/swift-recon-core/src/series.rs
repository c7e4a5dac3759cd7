//! Converting a whole series, section by section.
//!
//! Sections are processed strictly in file order. Each converted section is
//! written as one complete newline-terminated line, and the first failure
//! stops the run, so the output only ever holds whole lines.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::affine::ComputationError;
use crate::config::ConversionConfig;
use crate::frame::{format_section, swift_to_reconstruct};
use crate::parse::{parse_fields, read_transform_lines, ParseError};
use crate::types::{ImageHeight, SectionIndex};

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A line could not be parsed.
    #[error("section {section}: cannot parse {line:?}")]
    Parse {
        section: SectionIndex,
        line: String,
        #[source]
        source: ParseError,
    },

    /// A transform could not be converted.
    #[error("section {section}: cannot convert transform")]
    Computation {
        section: SectionIndex,
        #[source]
        source: ComputationError,
    },

    /// Reading the input or writing the output failed.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// The section that failed, if the failure is tied to one.
    pub fn section(&self) -> Option<SectionIndex> {
        match self {
            ConvertError::Parse { section, .. } | ConvertError::Computation { section, .. } => {
                Some(*section)
            }
            ConvertError::Io { .. } => None,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Number of sections written.
    pub sections: usize,
    /// Where they were written.
    pub output: PathBuf,
}

/// Convert one raw SWiFT line into a formatted Reconstruct line.
pub fn convert_line(
    line: &str,
    section: SectionIndex,
    height: ImageHeight,
) -> Result<String, ConvertError> {
    let parsed = parse_fields(line).map_err(|source| ConvertError::Parse {
        section,
        line: line.to_string(),
        source,
    })?;

    if let Some(label) = parsed.label_index() {
        if label != section {
            warn!("section {section} is labelled {label}; using its position");
        }
    }

    let recon = swift_to_reconstruct(&parsed.transform, height)
        .map_err(|source| ConvertError::Computation { section, source })?;
    Ok(format_section(&recon, section))
}

/// Convert every line of a series and write the results to `writer`.
///
/// Returns the number of sections written. `path` only labels I/O errors.
pub fn write_series<S, W>(
    lines: &[S],
    height: ImageHeight,
    writer: &mut W,
    path: &Path,
) -> Result<usize, ConvertError>
where
    S: AsRef<str>,
    W: Write,
{
    let io_error = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    for (section, line) in lines.iter().enumerate() {
        let converted = convert_line(line.as_ref(), section, height)?;
        debug!("section {section}: {converted}");
        writer
            .write_all(format!("{converted}\n").as_bytes())
            .map_err(io_error)?;
    }
    writer.flush().map_err(io_error)?;
    Ok(lines.len())
}

/// Convert every line of a series in memory.
pub fn convert_series<S: AsRef<str>>(
    lines: &[S],
    height: ImageHeight,
) -> Result<Vec<String>, ConvertError> {
    lines
        .iter()
        .enumerate()
        .map(|(section, line)| convert_line(line.as_ref(), section, height))
        .collect()
}

/// Run a conversion described by `config`.
///
/// The output file is appended to when it already exists.
pub fn convert_file(config: &ConversionConfig) -> Result<ConversionSummary, ConvertError> {
    info!(
        "converting {} -> {} (image height {})",
        config.input.display(),
        config.output.display(),
        config.image_height
    );

    let lines = read_transform_lines(&config.input).map_err(|source| ConvertError::Io {
        path: config.input.clone(),
        source,
    })?;

    let output_error = |source| ConvertError::Io {
        path: config.output.clone(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.output)
        .map_err(output_error)?;
    let mut writer = BufWriter::new(file);

    let sections = write_series(&lines, config.image_height, &mut writer, &config.output)?;

    let file = writer
        .into_inner()
        .map_err(|err| output_error(err.into_error()))?;
    file.sync_all().map_err(output_error)?;

    info!("wrote {sections} sections to {}", config.output.display());
    Ok(ConversionSummary {
        sections,
        output: config.output.clone(),
    })
}

/// Remove `path` if it exists so the next run starts from an empty file.
pub fn remove_existing_output(path: &Path) -> Result<bool, ConvertError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("removed existing {}", path.display());
            Ok(true)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
