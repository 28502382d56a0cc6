//! 3x3 homogeneous 2D transform.
//!
//! A point `(x, y)` maps to
//!
//! ```text
//! x' = m11*x + m12*y + m13
//! y' = m21*x + m22*y + m23
//! w  = m31*x + m32*y + m33
//! ```
//!
//! [`Mat::transform`] ignores `w` (affine use); [`Mat::map_perspective`] divides by it.
//! `scale`, `translate` and `rotate` compose in place, each one applied after everything that
//! was composed before it.

use crate::foundation::core::Point;

/// 3x3 transform coefficients, row-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat {
    /// Row 1, column 1.
    pub m11: f64,
    /// Row 1, column 2.
    pub m12: f64,
    /// Row 1, column 3 (x translation).
    pub m13: f64,
    /// Row 2, column 1.
    pub m21: f64,
    /// Row 2, column 2.
    pub m22: f64,
    /// Row 2, column 3 (y translation).
    pub m23: f64,
    /// Row 3, column 1 (perspective x).
    pub m31: f64,
    /// Row 3, column 2 (perspective y).
    pub m32: f64,
    /// Row 3, column 3.
    pub m33: f64,
}

impl Default for Mat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat {
    /// Identity transform.
    pub const IDENTITY: Self = Self::new([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Build from nine row-major coefficients.
    pub const fn new(c: [f64; 9]) -> Self {
        Self {
            m11: c[0],
            m12: c[1],
            m13: c[2],
            m21: c[3],
            m22: c[4],
            m23: c[5],
            m31: c[6],
            m32: c[7],
            m33: c[8],
        }
    }

    /// Nine row-major coefficients.
    pub fn coeffs(&self) -> [f64; 9] {
        [
            self.m11, self.m12, self.m13, self.m21, self.m22, self.m23, self.m31, self.m32,
            self.m33,
        ]
    }

    /// Convert a `kurbo` affine into the equivalent matrix.
    pub fn from_affine(a: kurbo::Affine) -> Self {
        let [a, b, c, d, e, f] = a.as_coeffs();
        Self::new([a, c, e, b, d, f, 0.0, 0.0, 1.0])
    }

    /// Scale the first two rows (`x` by `sx`, `y` by `sy`).
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.m11 *= sx;
        self.m12 *= sx;
        self.m13 *= sx;
        self.m21 *= sy;
        self.m22 *= sy;
        self.m23 *= sy;
    }

    /// Translate by `(x, y)` after the current transform.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.m11 += x * self.m31;
        self.m12 += x * self.m32;
        self.m13 += x * self.m33;
        self.m21 += y * self.m31;
        self.m22 += y * self.m32;
        self.m23 += y * self.m33;
    }

    /// Rotate by `theta` radians after the current transform.
    pub fn rotate(&mut self, theta: f64) {
        let (s, c) = theta.sin_cos();
        let rot = |a: f64, b: f64| (c * a - s * b, s * a + c * b);
        (self.m11, self.m21) = rot(self.m11, self.m21);
        (self.m12, self.m22) = rot(self.m12, self.m22);
        (self.m13, self.m23) = rot(self.m13, self.m23);
    }

    /// Determinant of the full 3x3 matrix.
    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 * self.m33
            + self.m12 * self.m23 * self.m31
            + self.m13 * self.m21 * self.m32
            - self.m13 * self.m22 * self.m31
            - self.m12 * self.m21 * self.m33
            - self.m11 * self.m23 * self.m32
    }

    /// Closed-form inverse (adjugate over determinant).
    ///
    /// Singular input is not rejected: the result holds non-finite or huge coefficients, and
    /// the points it produces fall outside any raster and sample as transparent.
    pub fn inverse(&self) -> Self {
        let k = 1.0 / self.determinant();
        Self::new([
            k * (self.m22 * self.m33 - self.m23 * self.m32),
            -k * (self.m12 * self.m33 - self.m13 * self.m32),
            k * (self.m12 * self.m23 - self.m13 * self.m22),
            -k * (self.m21 * self.m33 - self.m23 * self.m31),
            k * (self.m11 * self.m33 - self.m13 * self.m31),
            -k * (self.m11 * self.m23 - self.m13 * self.m21),
            k * (self.m21 * self.m32 - self.m22 * self.m31),
            -k * (self.m11 * self.m32 - self.m12 * self.m31),
            k * (self.m11 * self.m22 - self.m12 * self.m21),
        ])
    }

    /// Matrix applying `self` first and `next` afterwards.
    pub fn then(&self, next: &Mat) -> Mat {
        let a = next.coeffs();
        let b = self.coeffs();
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        Mat::new(out)
    }

    /// Affine mapping; the homogeneous row is ignored.
    pub fn transform(&self, p: Point) -> Point {
        Point::new(
            p.x * self.m11 + p.y * self.m12 + self.m13,
            p.x * self.m21 + p.y * self.m22 + self.m23,
        )
    }

    /// Full projective mapping with the homogeneous divide.
    ///
    /// Points on the vanishing line (`w == 0`) come back non-finite.
    pub fn map_perspective(&self, p: Point) -> Point {
        let w = p.x * self.m31 + p.y * self.m32 + self.m33;
        Point::new(
            (p.x * self.m11 + p.y * self.m12 + self.m13) / w,
            (p.x * self.m21 + p.y * self.m22 + self.m23) / w,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mat.rs"]
mod tests;
