//! Reading SWiFT `c_afm` transform files.
//!
//! Each line of a SWiFT transform file describes one section:
//!
//! ```text
//! <label> <a> <b> <tx> <c> <d> <ty>
//! ```
//!
//! Sections are addressed by line position. The label is carried along for
//! diagnostics only.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::affine::AffineTransform;

/// Number of whitespace-separated fields a transform line must contain.
pub const FIELD_COUNT: usize = 7;

/// Errors raised while turning a text line into a transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The requested section is past the end of the file.
    #[error("section {index} is out of range ({len} lines available)")]
    OutOfRange { index: usize, len: usize },

    /// Fewer than the required fields were present.
    #[error("expected at least 7 fields, found {found}")]
    MissingFields { found: usize },

    /// A coefficient could not be read as a number.
    #[error("field {field} ({value:?}) is not a number")]
    InvalidNumber { field: usize, value: String },

    /// A coefficient parsed to infinity or NaN.
    #[error("field {field} ({value:?}) is not finite")]
    NonFinite { field: usize, value: String },
}

/// A parsed line: its written label and the transform it encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformLine<'a> {
    /// Field 0, exactly as written.
    pub label: &'a str,
    pub transform: AffineTransform,
}

impl TransformLine<'_> {
    /// The label read as a section number, if it is one.
    ///
    /// SWiFT writes labels as integers; some exporters write `3.0`.
    pub fn label_index(&self) -> Option<usize> {
        if let Ok(index) = self.label.parse::<usize>() {
            return Some(index);
        }
        let value = self.label.parse::<f64>().ok()?;
        (value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64)
            .then_some(value as usize)
    }
}

/// Parse a single transform line.
///
/// Fields past the seventh are ignored.
pub fn parse_fields(line: &str) -> Result<TransformLine<'_>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < FIELD_COUNT {
        return Err(ParseError::MissingFields {
            found: fields.len(),
        });
    }

    let mut coefficients = [0.0; 6];
    for (slot, field) in coefficients.iter_mut().zip(1..FIELD_COUNT) {
        *slot = parse_coefficient(field, fields[field])?;
    }

    Ok(TransformLine {
        label: fields[0],
        transform: AffineTransform::from_coefficients(coefficients),
    })
}

fn parse_coefficient(field: usize, raw: &str) -> Result<f64, ParseError> {
    let value = raw.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::NonFinite {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse the transform at position `index` of `lines`.
///
/// # Example
///
/// ```
/// use swift_recon_core::parse::parse_line;
///
/// let lines = vec!["0 1 0 5 0 1 10".to_string()];
/// let t = parse_line(&lines, 0).unwrap();
/// assert_eq!(t.coefficients(), [1.0, 0.0, 5.0, 0.0, 1.0, 10.0]);
/// ```
pub fn parse_line<S: AsRef<str>>(
    lines: &[S],
    index: usize,
) -> Result<AffineTransform, ParseError> {
    let line = lines.get(index).ok_or(ParseError::OutOfRange {
        index,
        len: lines.len(),
    })?;
    parse_fields(line.as_ref()).map(|parsed| parsed.transform)
}

/// Split file contents into trimmed lines, one per section.
///
/// Handles both `\n` and `\r\n` endings. A trailing newline does not add a
/// section.
pub fn split_lines(contents: &str) -> Vec<String> {
    contents.lines().map(|line| line.trim().to_string()).collect()
}

/// Read a SWiFT transform file into trimmed lines.
pub fn read_transform_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(split_lines(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_line() {
        let parsed = parse_fields("12 0.9998 -0.0175 34.5 0.0175 0.9998 -12.25").unwrap();
        assert_eq!(parsed.label, "12");
        assert_eq!(
            parsed.transform,
            AffineTransform::new(0.9998, -0.0175, 34.5, 0.0175, 0.9998, -12.25)
        );
    }

    #[test]
    fn test_matrix_layout() {
        let t = parse_line(&["0 1 2 3 4 5 6"], 0).unwrap();
        assert_eq!(
            t.matrix(),
            [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn test_parse_selects_by_position() {
        let lines = ["0 1 0 0 0 1 0", "7 2 0 0 0 2 0"];
        let t = parse_line(&lines, 1).unwrap();
        assert_eq!(t.a, 2.0);
        assert_eq!(t.d, 2.0);
    }

    #[test]
    fn test_tabs_and_repeated_spaces() {
        let t = parse_line(&["3\t1   0\t\t5 0 1   10"], 0).unwrap();
        assert_eq!(t.coefficients(), [1.0, 0.0, 5.0, 0.0, 1.0, 10.0]);
    }

    #[test]
    fn test_scientific_notation_input() {
        let t = parse_line(&["0 1e0 -2.5E-3 1.5e2 0 1 0"], 0).unwrap();
        assert_eq!(t.b, -0.0025);
        assert_eq!(t.tx, 150.0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let t = parse_line(&["0 1 0 5 0 1 10 0 0 1"], 0).unwrap();
        assert_eq!(t.coefficients(), [1.0, 0.0, 5.0, 0.0, 1.0, 10.0]);
    }

    #[test]
    fn test_label_is_not_parsed() {
        let parsed = parse_fields("sec-a 1 0 0 0 1 0").unwrap();
        assert_eq!(parsed.label, "sec-a");
        assert_eq!(parsed.label_index(), None);
    }

    #[test]
    fn test_label_index() {
        assert_eq!(parse_fields("4 1 0 0 0 1 0").unwrap().label_index(), Some(4));
        assert_eq!(parse_fields("4.0 1 0 0 0 1 0").unwrap().label_index(), Some(4));
        assert_eq!(parse_fields("4.5 1 0 0 0 1 0").unwrap().label_index(), None);
        assert_eq!(parse_fields("-1 1 0 0 0 1 0").unwrap().label_index(), None);
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            parse_line(&["0 1 0 5 0 1"], 0),
            Err(ParseError::MissingFields { found: 6 })
        );
        assert_eq!(
            parse_line(&[""], 0),
            Err(ParseError::MissingFields { found: 0 })
        );
    }

    #[test]
    fn test_non_numeric_field() {
        assert_eq!(
            parse_line(&["0 1 0 five 0 1 10"], 0),
            Err(ParseError::InvalidNumber {
                field: 3,
                value: "five".to_string()
            })
        );
    }

    #[test]
    fn test_non_finite_field() {
        assert_eq!(
            parse_line(&["0 1 0 0 0 inf 0"], 0),
            Err(ParseError::NonFinite {
                field: 5,
                value: "inf".to_string()
            })
        );
        assert!(matches!(
            parse_line(&["0 NaN 0 0 0 1 0"], 0),
            Err(ParseError::NonFinite { field: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        let lines: [&str; 1] = ["0 1 0 0 0 1 0"];
        assert_eq!(
            parse_line(&lines, 3),
            Err(ParseError::OutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        let lines = split_lines("0 1 0 0 0 1 0\r\n  1 1 0 0 0 1 0  \r\n");
        assert_eq!(lines, vec!["0 1 0 0 0 1 0", "1 1 0 0 0 1 0"]);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::MissingFields { found: 2 };
        assert_eq!(err.to_string(), "expected at least 7 fields, found 2");

        let err = ParseError::InvalidNumber {
            field: 4,
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "field 4 (\"x\") is not a number");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
