//! 2D affine transforms in homogeneous coordinates.
//!
//! An [`AffineTransform`] stores the six free coefficients of
//!
//! ```text
//! [ a  b  tx ]
//! [ c  d  ty ]
//! [ 0  0  1  ]
//! ```
//!
//! The bottom row is never stored, so every value of the type is a valid
//! affine map and [`AffineTransform::matrix`] always reports `(0, 0, 1)`.

use thiserror::Error;

/// Determinants with a magnitude below this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Errors raised by numeric operations on transforms.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ComputationError {
    /// The linear part has no inverse.
    #[error("transform is singular (determinant {determinant:e})")]
    Singular { determinant: f64 },

    /// The inverse exists but does not fit in an f64.
    #[error("transform inverse has non-finite coefficients")]
    NonFinite,
}

/// A 2D affine transform with an implicit `(0, 0, 1)` bottom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Row 0, column 0.
    pub a: f64,
    /// Row 0, column 1.
    pub b: f64,
    /// Row 0, column 2 (x translation).
    pub tx: f64,
    /// Row 1, column 0.
    pub c: f64,
    /// Row 1, column 1.
    pub d: f64,
    /// Row 1, column 2 (y translation).
    pub ty: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// The transform that leaves every point in place.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        tx: 0.0,
        c: 0.0,
        d: 1.0,
        ty: 0.0,
    };

    /// Create a transform from its coefficients in row-major order.
    pub fn new(a: f64, b: f64, tx: f64, c: f64, d: f64, ty: f64) -> Self {
        Self { a, b, tx, c, d, ty }
    }

    /// Create a transform from `[a, b, tx, c, d, ty]`.
    pub fn from_coefficients(coefficients: [f64; 6]) -> Self {
        let [a, b, tx, c, d, ty] = coefficients;
        Self::new(a, b, tx, c, d, ty)
    }

    /// The first two matrix rows read row-major: `[a, b, tx, c, d, ty]`.
    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.tx, self.c, self.d, self.ty]
    }

    /// Full 3×3 homogeneous matrix.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.a, self.b, self.tx],
            [self.c, self.d, self.ty],
            [0.0, 0.0, 1.0],
        ]
    }

    /// Same linear part with the translation column replaced.
    pub fn with_translation(&self, tx: f64, ty: f64) -> Self {
        Self { tx, ty, ..*self }
    }

    /// Multiply a homogeneous column vector `[x, y, w]` by this matrix.
    pub fn apply(&self, point: [f64; 3]) -> [f64; 3] {
        let [x, y, w] = point;
        [
            self.a * x + self.b * y + self.tx * w,
            self.c * x + self.d * y + self.ty * w,
            w,
        ]
    }

    /// Map a cartesian point.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let [px, py, _] = self.apply([x, y, 1.0]);
        (px, py)
    }

    /// Determinant of the 3×3 matrix, equal to that of the 2×2 linear block.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// True when every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.coefficients().iter().all(|v| v.is_finite())
    }

    /// Closed-form inverse.
    ///
    /// The 2×2 linear block is inverted through its adjugate and the
    /// translation is recovered by back-substitution, `t' = -A⁻¹ t`.
    ///
    /// # Errors
    ///
    /// [`ComputationError::Singular`] when `|det| < SINGULAR_EPSILON`, and
    /// [`ComputationError::NonFinite`] if the result overflows.
    pub fn inverse(&self) -> Result<Self, ComputationError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(ComputationError::Singular { determinant: det });
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        let tx = -(a * self.tx + b * self.ty);
        let ty = -(c * self.tx + d * self.ty);

        let inverse = Self { a, b, tx, c, d, ty };
        if !inverse.is_finite() {
            return Err(ComputationError::NonFinite);
        }
        Ok(inverse)
    }

    /// Matrix product `self * rhs` (apply `rhs` first).
    pub fn compose(&self, rhs: &Self) -> Self {
        Self {
            a: self.a * rhs.a + self.b * rhs.c,
            b: self.a * rhs.b + self.b * rhs.d,
            tx: self.a * rhs.tx + self.b * rhs.ty + self.tx,
            c: self.c * rhs.a + self.d * rhs.c,
            d: self.c * rhs.b + self.d * rhs.d,
            ty: self.c * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }

    /// Largest absolute coefficient difference against `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.coefficients()
            .iter()
            .zip(other.coefficients())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
