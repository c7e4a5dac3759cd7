//! Text output for Reconstruct transform files.
//!
//! Reconstruct rejects exponential notation, so every coefficient is written
//! positionally using the shortest digits that read back to the same `f64`.

use crate::affine::AffineTransform;
use crate::types::SectionIndex;

/// Render one coefficient in positional notation.
///
/// Trailing zeros and a bare decimal point are dropped, and negative zero
/// is written as `0`. The value must be finite.
///
/// # Example
///
/// ```
/// use swift_recon_core::frame::format_coefficient;
///
/// assert_eq!(format_coefficient(1.0), "1");
/// assert_eq!(format_coefficient(1e-8), "0.00000001");
/// assert_eq!(format_coefficient(-2.5e8), "-250000000");
/// ```
pub fn format_coefficient(value: f64) -> String {
    debug_assert!(value.is_finite(), "cannot format {value} positionally");
    if value == 0.0 {
        return "0".to_string();
    }
    // f64's Display is shortest round-trip and never switches to an exponent
    format!("{value}")
}

/// Render a section as `<index> <a> <b> <tx> <c> <d> <ty>`.
pub fn format_section(transform: &AffineTransform, index: SectionIndex) -> String {
    let mut line = index.to_string();
    for value in transform.coefficients() {
        line.push(' ');
        line.push_str(&format_coefficient(value));
    }
    line
}


// ============================================================================
// Property-Based Tests
// ============================================================================
