//! Mathematical types shared between the registry consumers and the
//! collision engine.
//!
//! All values are `f64`; shapes are small in number and precision matters
//! more than memory for overlap correction.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

const R2D: f64 = 180.0 / PI;
const D2R: f64 = PI / 180.0;

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * R2D
}

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * D2R
}

/// Clamps `val` into `[min, max]`.
#[inline]
#[must_use]
pub fn clamp(val: f64, min: f64, max: f64) -> f64 {
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Squared distance between two coordinates (avoids sqrt).
#[inline]
#[must_use]
pub fn dist_sq(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    dx * dx + dy * dy
}

/// Distance between two coordinates.
#[inline]
#[must_use]
pub fn dist(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    dist_sq(x0, y0, x1, y1).sqrt()
}

// ============================================================================
// POINT
// ============================================================================

/// A location in 2D space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Returns the vector pointing from the origin to this point.
    #[must_use]
    pub const fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        dist_sq(self.x, self.y, other.x, other.y)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Self;
    fn add(self, rhs: Vector) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

// ============================================================================
// VECTOR
// ============================================================================

/// Direction and magnitude: velocity, acceleration, collision normals.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vector {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from an angle (radians) and a length.
    #[must_use]
    pub fn from_polar(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Angle of the vector in radians.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns the unit vector, or `None` for a zero-length vector.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len == 0.0 {
            None
        } else {
            Some(Self::new(self.x / len, self.y / len))
        }
    }

    /// Sets both components to zero.
    pub fn zero(&mut self) {
        *self = Self::ZERO;
    }

    /// Returns `true` when both components are zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// ============================================================================
// MATRIX
// ============================================================================

/// 3x3 affine transform matrix, stored row-major:
///
/// ```text
/// [ a, c, tx,
///   b, d, ty,
///   0, 0, 1  ]
/// ```
///
/// `a` and `d` scale/rotate along the x and y axis, `b` and `c` rotate or
/// skew, `tx` and `ty` translate. The last row is always `[0, 0, 1]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix(pub [f64; 9]);

impl Matrix {
    /// Index of element `a`.
    pub const A: usize = 0;
    /// Index of element `c`.
    pub const C: usize = 1;
    /// Index of element `tx`.
    pub const TX: usize = 2;
    /// Index of element `b`.
    pub const B: usize = 3;
    /// Index of element `d`.
    pub const D: usize = 4;
    /// Index of element `ty`.
    pub const TY: usize = 5;

    /// Matrix that leaves every point untouched.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Builds a matrix from its six affine elements.
    #[must_use]
    pub const fn transform(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self([a, c, tx, b, d, ty, 0.0, 0.0, 1.0])
    }

    /// Scales along both axes.
    #[must_use]
    pub const fn scale(x: f64, y: f64) -> Self {
        Self::transform(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Rotates by `radians` around the origin.
    #[must_use]
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::transform(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Slides points parallel to the x axis (`x` radians) and the y axis
    /// (`y` radians).
    #[must_use]
    pub fn skew(x: f64, y: f64) -> Self {
        Self::transform(1.0, y.tan(), x.tan(), 1.0, 0.0, 0.0)
    }

    /// Moves points by `(tx, ty)`.
    #[must_use]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::transform(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Returns `self * rhs`: `rhs` is applied first.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        let l = &self.0;
        let r = &rhs.0;
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| l[row * 3 + k] * r[k * 3 + col]).sum();
            }
        }
        Self(out)
    }

    /// Applies the matrix to a point.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let m = &self.0;
        Point::new(
            p.x * m[Self::A] + p.y * m[Self::C] + m[Self::TX],
            p.x * m[Self::B] + p.y * m[Self::D] + m[Self::TY],
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Rotation, scale, skew and translation merged into a [`Matrix`] on demand.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Transform {
    /// Rotation in radians.
    pub rotation: f64,
    /// Scale along x.
    pub scale_x: f64,
    /// Scale along y.
    pub scale_y: f64,
    /// Skew along x, in radians.
    pub skew_x: f64,
    /// Skew along y, in radians.
    pub skew_y: f64,
    /// Translation along x.
    pub translate_x: f64,
    /// Translation along y.
    pub translate_y: f64,
}

impl Transform {
    /// Transform that produces [`Matrix::IDENTITY`].
    pub const IDENTITY: Self = Self {
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        skew_x: 0.0,
        skew_y: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Resets to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Adds `radians` to the rotation.
    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        self.rotation += radians;
        self
    }

    /// Merges all components: scale first, then skew, rotation and finally
    /// translation.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        let mut m = Matrix::rotation(self.rotation)
            .multiply(&Matrix::skew(self.skew_x, self.skew_y))
            .multiply(&Matrix::scale(self.scale_x, self.scale_y));
        m.0[Matrix::TX] = self.translate_x;
        m.0[Matrix::TY] = self.translate_y;
        m
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_vector_operations() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(4.0, 5.0);

        let sum = a + b;
        assert_eq!(sum, Vector::new(5.0, 7.0));
        assert_eq!(a.dot(b), 14.0); // 1*4 + 2*5
        assert_eq!(Vector::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_normalize_zero_is_none() {
        assert!(Vector::ZERO.normalize().is_none());
        let n = Vector::new(0.0, -2.0).normalize().unwrap();
        assert_eq!(n, Vector::new(0.0, -1.0));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let p = Matrix::rotation(deg_to_rad(90.0)).apply(Point::new(1.0, 0.0));
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_multiply_applies_rhs_first() {
        let m = Matrix::translation(10.0, 0.0).multiply(&Matrix::scale(2.0, 2.0));
        let p = m.apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 2.0));
    }

    #[test]
    fn test_identity_transform_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Matrix::IDENTITY);

        let mut t = Transform::default();
        t.rotate(1.0);
        t.reset();
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_transform_translation() {
        let t = Transform {
            translate_x: 3.0,
            translate_y: -1.0,
            ..Transform::IDENTITY
        };
        assert_eq!(t.matrix().apply(Point::ZERO), Point::new(3.0, -1.0));
    }

    #[test]
    fn test_angle_conversion() {
        assert!((rad_to_deg(deg_to_rad(45.0)) - 45.0).abs() < EPS);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(dist(0.0, 0.0, 3.0, 4.0), 5.0);
    }

    #[test]
    fn test_point_bytemuck() {
        let p = Point::new(1.0, 2.0);
        let bytes: &[u8] = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 16); // 2 * 8 bytes
    }
}
