//! The SWiFT → Reconstruct conversion and its mirror.
//!
//! Every step is a pure function from one transform to the next, so the
//! intermediate matrices can be inspected and tested on their own.
//!
//! Before rounding, steps 1–4 compute `F · T · F⁻¹` where `F` is the y-axis
//! flip `(x, y) → (x, height − y)`. Reconstruct then wants the inverse of
//! that matrix.

use crate::affine::{AffineTransform, ComputationError};
use crate::types::ImageHeight;

/// Decimal places kept in the re-anchored translation.
pub const TRANSLATION_DECIMALS: i32 = 5;

/// Round a translation component to [`TRANSLATION_DECIMALS`] places.
///
/// Ties round away from zero.
pub fn round_translation(value: f64) -> f64 {
    let scale = 10f64.powi(TRANSLATION_DECIMALS);
    (value * scale).round() / scale
}

/// The bottom-left image corner in SWiFT's frame, as a homogeneous point.
pub fn bottom_left_corner(height: ImageHeight) -> [f64; 3] {
    [0.0, height.as_f64(), 1.0]
}

/// How far `transform` moves the bottom-left corner, `T·p − p`.
pub fn bottom_left_delta(transform: &AffineTransform, height: ImageHeight) -> (f64, f64) {
    let corner = bottom_left_corner(height);
    let moved = transform.apply(corner);
    (moved[0] - corner[0], moved[1] - corner[1])
}

/// Re-anchor the translation of `transform` to the bottom-left corner.
pub fn anchor_to_bottom_left(transform: &AffineTransform, height: ImageHeight) -> AffineTransform {
    let (dx, dy) = bottom_left_delta(transform, height);
    transform.with_translation(round_translation(dx), round_translation(dy))
}

/// Undo [`anchor_to_bottom_left`], recovering a top-left based translation.
pub fn anchor_to_top_left(transform: &AffineTransform, height: ImageHeight) -> AffineTransform {
    let h = height.as_f64();
    transform.with_translation(
        transform.tx - transform.b * h,
        transform.ty - (transform.d - 1.0) * h,
    )
}

/// Reverse the y axis by negating `b`, `c` and `ty`.
///
/// Applying it twice returns the original transform.
pub fn flip_y_axis(transform: &AffineTransform) -> AffineTransform {
    AffineTransform {
        b: -transform.b,
        c: -transform.c,
        ty: -transform.ty,
        ..*transform
    }
}

/// Express a SWiFT transform in Reconstruct's frame of reference.
///
/// # Errors
///
/// Returns a [`ComputationError`] when the re-anchored matrix cannot be
/// inverted. A singular alignment never yields NaN or infinite output.
pub fn swift_to_reconstruct(
    transform: &AffineTransform,
    height: ImageHeight,
) -> Result<AffineTransform, ComputationError> {
    let anchored = anchor_to_bottom_left(transform, height);
    flip_y_axis(&anchored).inverse()
}

/// Express a Reconstruct transform in SWiFT's frame of reference.
///
/// Mirrors [`swift_to_reconstruct`]; the round trip is exact up to the
/// 5-decimal rounding of the anchored translation.
pub fn reconstruct_to_swift(
    transform: &AffineTransform,
    height: ImageHeight,
) -> Result<AffineTransform, ComputationError> {
    let anchored = flip_y_axis(&transform.inverse()?);
    Ok(anchor_to_top_left(&anchored, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn height(pixels: u32) -> ImageHeight {
        ImageHeight::new(pixels).unwrap()
    }

    #[test]
    fn test_bottom_left_corner() {
        assert_eq!(bottom_left_corner(height(24576)), [0.0, 24576.0, 1.0]);
    }

    #[test]
    fn test_delta_of_translation() {
        let t = AffineTransform::new(1.0, 0.0, 5.0, 0.0, 1.0, 10.0);
        assert_eq!(bottom_left_delta(&t, height(100)), (5.0, 10.0));
    }

    #[test]
    fn test_delta_includes_linear_part() {
        // Scaling by 2 moves (0, 100) to (0, 200)
        let t = AffineTransform::new(2.0, 0.0, 0.0, 0.0, 2.0, 0.0);
        assert_eq!(bottom_left_delta(&t, height(100)), (0.0, 100.0));

        // Shear in x moves the corner sideways by b * height
        let t = AffineTransform::new(1.0, 0.25, 3.0, 0.0, 1.0, 0.0);
        assert_eq!(bottom_left_delta(&t, height(100)), (28.0, 0.0));
    }

    #[test]
    fn test_anchor_rounds_to_five_places() {
        let t = AffineTransform::new(1.0, 0.0, 0.123456789, 0.0, 1.0, -7.000004);
        let anchored = anchor_to_bottom_left(&t, height(10));
        assert_eq!(anchored.tx, 0.12346);
        assert_eq!(anchored.ty, -7.0);
        // Linear part untouched
        assert_eq!((anchored.a, anchored.b, anchored.c, anchored.d), (1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_round_translation() {
        assert_eq!(round_translation(1.234564), 1.23456);
        assert_eq!(round_translation(-1.234566), -1.23457);
        assert_eq!(round_translation(42.0), 42.0);
    }

    #[test]
    fn test_flip_negates_b_c_ty() {
        let t = AffineTransform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(
            flip_y_axis(&t).coefficients(),
            [1.0, -2.0, 3.0, -4.0, 5.0, -6.0]
        );
        assert_eq!(flip_y_axis(&flip_y_axis(&t)), t);
    }

    #[test]
    fn test_pure_translation_oracle() {
        let t = AffineTransform::new(1.0, 0.0, 5.0, 0.0, 1.0, 10.0);
        let recon = swift_to_reconstruct(&t, height(100)).unwrap();
        assert_eq!(recon.coefficients(), [1.0, 0.0, -5.0, 0.0, 1.0, 10.0]);
    }

    #[test]
    fn test_rotation_oracle() {
        // 90 degrees, y down
        let t = AffineTransform::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0);
        let recon = swift_to_reconstruct(&t, height(100)).unwrap();
        assert_eq!(recon.coefficients(), [0.0, -1.0, 100.0, 1.0, 0.0, 100.0]);
    }

    #[test]
    fn test_identity_stays_identity() {
        for pixels in [1, 100, 1000, 24576, u32::MAX] {
            let recon = swift_to_reconstruct(&AffineTransform::IDENTITY, height(pixels)).unwrap();
            assert_eq!(recon, AffineTransform::IDENTITY, "height {pixels}");
        }
    }

    #[test]
    fn test_singular_transform_fails() {
        let t = AffineTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            swift_to_reconstruct(&t, height(1000)),
            Err(ComputationError::Singular { .. })
        ));
    }

    #[test]
    fn test_singular_with_translation_fails() {
        let t = AffineTransform::new(0.0, 0.0, 12.0, 0.0, 0.0, -3.0);
        assert!(swift_to_reconstruct(&t, height(1000)).is_err());
    }

    #[test]
    fn test_reconstruct_to_swift_oracle() {
        let recon = AffineTransform::new(1.0, 0.0, -5.0, 0.0, 1.0, 10.0);
        let swift = reconstruct_to_swift(&recon, height(100)).unwrap();
        assert!(swift.max_abs_diff(&AffineTransform::new(1.0, 0.0, 5.0, 0.0, 1.0, 10.0)) < 1e-12);
    }

    #[test]
    fn test_matches_flip_conjugation() {
        // F·T·F⁻¹ with F: (x, y) -> (x, h - y)
        let h = 500.0;
        let flip = AffineTransform::new(1.0, 0.0, 0.0, 0.0, -1.0, h);
        let t = AffineTransform::new(0.75, 0.5, 8.0, -0.5, 1.25, -4.0);

        let conjugated = flip.compose(&t).compose(&flip.inverse().unwrap());
        let expected = conjugated.inverse().unwrap();
        let recon = swift_to_reconstruct(&t, height(500)).unwrap();

        assert!(recon.max_abs_diff(&expected) < 1e-9);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
