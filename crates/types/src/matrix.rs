//! Affine transformation matrices.
//!
//! Coefficients follow the PDF `cm` layout `[a b c d e f]`, with points as
//! row vectors:
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! Every `set_*` call pre-multiplies the elementary transform onto what has
//! been accumulated, so the most recent call is applied to a point first and
//! the first call (usually a translation) is applied last.

use crate::error::TypeError;
use crate::geometry::Point;
use crate::unit::format_number;
use serde::{Deserialize, Serialize};
use std::fmt;

const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformationMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for TransformationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformationMatrix {
    pub const fn identity() -> Self {
        Self::from_components(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub const fn from_components(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Builds a matrix from a translation, rotation (radians) and scale,
    /// composed in that order.
    pub fn new(tx: f64, ty: f64, angle: f64, sx: f64, sy: f64) -> Self {
        let mut matrix = Self::identity();
        matrix.set_translation(tx, ty);
        matrix.set_rotation(angle);
        matrix.set_scale(sx, sy);
        matrix
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self::from_components(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_components(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// A skew with the raw shear factors (not angles).
    pub fn skew(x: f64, y: f64) -> Self {
        Self::from_components(1.0, y, x, 1.0, 0.0, 0.0)
    }

    pub fn scale(x: f64, y: f64) -> Self {
        Self::from_components(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub fn components(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// `self × other`: applies `self` to a point first, then `other`.
    pub fn multiply(&self, other: &TransformationMatrix) -> TransformationMatrix {
        TransformationMatrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn prepend(&mut self, elementary: TransformationMatrix) {
        *self = elementary.multiply(self);
    }

    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.prepend(Self::translation(x, y));
    }

    pub fn set_rotation(&mut self, radians: f64) {
        self.prepend(Self::rotation(radians));
    }

    pub fn set_rotation_deg(&mut self, degrees: f64) {
        self.set_rotation(degrees.to_radians());
    }

    pub fn set_skew(&mut self, x: f64, y: f64) {
        self.prepend(Self::skew(x, y));
    }

    pub fn set_scale(&mut self, x: f64, y: f64) {
        self.prepend(Self::scale(x, y));
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transform, or `None` for a singular matrix.
    pub fn inverse(&self) -> Option<TransformationMatrix> {
        let det = self.determinant();
        if det.abs() < TOLERANCE {
            return None;
        }
        Some(TransformationMatrix {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    pub fn transform_xy(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Transforms a point, returning it in points. Relative coordinates fail.
    pub fn transform_point(&self, point: &Point) -> Result<Point, TypeError> {
        let (x, y) = point.to_points()?;
        let (tx, ty) = self.transform_xy(x, y);
        Ok(Point::pt(tx, ty))
    }

    pub fn is_identity(&self) -> bool {
        self.components()
            .iter()
            .zip(Self::identity().components())
            .all(|(value, expected)| (value - expected).abs() < TOLERANCE)
    }
}

impl fmt::Display for TransformationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components().iter().map(|v| format_number(*v)).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_maps(matrix: &TransformationMatrix, from: (f64, f64), to: (f64, f64)) {
        let (x, y) = matrix.transform_xy(from.0, from.1);
        assert!(
            (x - to.0).abs() < 1e-4 && (y - to.1).abs() < 1e-4,
            "{:?} mapped to ({}, {}), expected {:?}",
            from,
            x,
            y,
            to
        );
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let m = TransformationMatrix::default();
        assert!(m.is_identity());
        assert_maps(&m, (12.5, -3.0), (12.5, -3.0));
        let p = m.transform_point(&Point::pt(7.0, 9.0)).unwrap();
        assert_eq!(p, Point::pt(7.0, 9.0));
    }

    #[test]
    fn test_rotation_90() {
        let mut m = TransformationMatrix::identity();
        m.set_rotation_deg(90.0);
        assert_maps(&m, (0.0, 1.0), (-1.0, 0.0));
        assert_maps(&m, (1.0, 1.0), (-1.0, 1.0));
        assert_maps(&m, (1.0, 0.0), (0.0, 1.0));
        assert!(!m.is_identity());
    }

    #[test]
    fn test_rotation_45() {
        let mut m = TransformationMatrix::identity();
        m.set_rotation(std::f64::consts::FRAC_PI_4);
        assert_maps(&m, (10.0, 20.0), (-7.0711, 21.2132));
        assert_maps(&m, (20.0, 20.0), (0.0, 28.2843));
        assert_maps(&m, (20.0, 10.0), (7.0711, 21.2132));
        assert_maps(&m, (10.0, 10.0), (0.0, 14.1421));
    }

    #[test]
    fn test_translation() {
        let mut m = TransformationMatrix::identity();
        m.set_translation(14.0, 10.0);
        assert_maps(&m, (7.0, 9.0), (21.0, 19.0));
    }

    #[test]
    fn test_skew_uses_raw_factors() {
        let mut m = TransformationMatrix::identity();
        m.set_skew(2.0, 0.0);
        assert_maps(&m, (0.0, 1.0), (2.0, 1.0));
        assert_maps(&m, (1.0, 1.0), (3.0, 1.0));

        let mut m = TransformationMatrix::identity();
        m.set_skew(9.0, 6.0);
        assert_maps(&m, (7.0, 9.0), (88.0, 51.0));
        assert_maps(&m, (9.0, 9.0), (90.0, 63.0));
        assert_maps(&m, (9.0, 7.0), (72.0, 61.0));
        assert_maps(&m, (7.0, 7.0), (70.0, 49.0));
    }

    #[test]
    fn test_scale() {
        let mut m = TransformationMatrix::identity();
        m.set_scale(2.0, 3.0);
        assert_maps(&m, (1.0, 1.0), (2.0, 3.0));

        let mut m = TransformationMatrix::identity();
        m.set_scale(3.0, 1.0);
        assert_maps(&m, (7.0, 9.0), (21.0, 9.0));
    }

    #[test]
    fn test_translate_rotate_skew_composition() {
        let mut m = TransformationMatrix::identity();
        m.set_translation(4.0, 2.0);
        m.set_rotation_deg(45.0);
        m.set_skew(4.0, 2.0);
        assert_maps(&m, (0.0, 1.0), (6.1213, 5.5355));
        assert_maps(&m, (1.0, 1.0), (5.4142, 7.6569));
        assert_maps(&m, (1.0, 0.0), (3.2929, 4.1213));
        assert_maps(&m, (0.0, 0.0), (4.0, 2.0));
    }

    #[test]
    fn test_new_composes_translate_rotate_scale() {
        let built = TransformationMatrix::new(5.0, 6.0, 0.3, 2.0, 0.5);
        let mut manual = TransformationMatrix::identity();
        manual.set_translation(5.0, 6.0);
        manual.set_rotation(0.3);
        manual.set_scale(2.0, 0.5);
        assert_eq!(built, manual);
    }

    #[test]
    fn test_inverse_round_trips() {
        let m = TransformationMatrix::new(10.0, -4.0, 1.1, 3.0, 2.0);
        let inv = m.inverse().unwrap();
        assert!(m.multiply(&inv).is_identity());
        assert!(TransformationMatrix::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_transform_point_rejects_relative_units() {
        let m = TransformationMatrix::translation(1.0, 1.0);
        let p = Point::new(crate::unit::Unit::percent(10.0), crate::unit::Unit::ZERO);
        assert!(m.transform_point(&p).is_err());
    }

    #[test]
    fn test_display() {
        let m = TransformationMatrix::translation(14.0, 10.5);
        assert_eq!(m.to_string(), "[1 0 0 1 14 10.5]");
    }
}
