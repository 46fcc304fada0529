//! Foundation types, constants, and tolerance helpers.
//!
//! Everything else in the crate depends on these: the [`Point`] / [`Vector2`]
//! pair used on both sides of every mapping, the [`BoundingBox`] produced by
//! the arc sampler, and the [`Frame`] a chart layout hands to transformers.

use core::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Tolerance for "numerically equal" checks on angles and unit distances.
pub const NUMBER_EPSILON: f64 = 1e-5;

// ============================================================================
// Vector / Point
// ============================================================================

/// Two-component vector consumed and produced by transformers.
pub type Vector2 = [f64; 2];

/// A 2D point, in normalized-data or pixel space depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin to this point.
    #[inline]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Swap the two components.
    #[inline]
    pub fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

/// Axis-aligned extent. Invariant: `min_x <= max_x`, `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// The box enclosing the whole unit circle.
    pub fn unit() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0)
    }

    /// Smallest box containing every point. Returns `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Self::new(first.x, first.x, first.y, first.y);
        for p in iter {
            if p.x < b.min_x {
                b.min_x = p.x;
            }
            if p.x > b.max_x {
                b.max_x = p.x;
            }
            if p.y < b.min_y {
                b.min_y = p.y;
            }
            if p.y > b.max_y {
                b.max_y = p.y;
            }
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Layout box `(x, y, width, height)` supplied by the chart layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the frame.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[inline]
pub(crate) fn is_valid_size(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

// ============================================================================
// Approximate equality comparison
// ============================================================================

/// Absolute comparison against [`NUMBER_EPSILON`].
#[inline]
pub fn is_number_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < NUMBER_EPSILON
}

/// Compare two floating-point values for approximate equality using
/// relative comparison scaled by the smaller exponent.
pub fn is_equal_eps(v1: f64, v2: f64, epsilon: f64) -> bool {
    if (v1 < 0.0) != (v2 < 0.0) {
        return v1.abs() < epsilon && v2.abs() < epsilon;
    }

    let min_exp = exponent(v1).min(exponent(v2));
    let scale = (2.0_f64).powi(-min_exp);

    (v1 * scale - v2 * scale).abs() < epsilon
}

/// Binary exponent `e` such that `x = m * 2^e` with `0.5 <= |m| < 1`.
#[inline]
fn exponent(x: f64) -> i32 {
    if x == 0.0 {
        return 0;
    }
    ((x.to_bits() >> 52) & 0x7FF) as i32 - 1022
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_conversion() {
        let p: Point = [1.5, 2.5].into();
        assert_eq!(p, Point::new(1.5, 2.5));
        let v: Vector2 = p.into();
        assert_eq!(v, [1.5, 2.5]);
        assert_eq!(p.swapped(), Point::new(2.5, 1.5));
    }

    #[test]
    fn test_point_arithmetic() {
        let d = Point::new(4.0, 6.0) - Point::new(1.0, 2.0);
        assert_eq!(d, Point::new(3.0, 4.0));
        assert!((d.length() - 5.0).abs() < 1e-12);
        assert_eq!(d + Point::new(1.0, 1.0), Point::new(4.0, 5.0));
    }

    #[test]
    fn test_bounding_box_from_points() {
        let b = BoundingBox::from_points([
            Point::new(0.0, 0.0),
            Point::new(-2.0, 1.0),
            Point::new(3.0, -4.0),
        ])
        .unwrap();
        assert_eq!(b, BoundingBox::new(-2.0, 3.0, -4.0, 1.0));
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 5.0);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_frame() {
        let f = Frame::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(f.center(), Point::new(110.0, 70.0));
        assert!(is_valid_size(f.width, f.height));
        assert!(!is_valid_size(0.0, 10.0));
        assert!(!is_valid_size(f64::NAN, 10.0));
        assert!(!is_valid_size(10.0, -1.0));
    }

    #[test]
    fn test_is_number_equal() {
        assert!(is_number_equal(TWO_PI, TWO_PI - 1e-7));
        assert!(!is_number_equal(TWO_PI, TWO_PI - 1e-3));
    }

    #[test]
    fn test_is_equal_eps() {
        assert!(is_equal_eps(1.0, 1.0, 1e-10));
        assert!(is_equal_eps(1.0, 1.0 + 1e-11, 1e-10));
        assert!(!is_equal_eps(1.0, 2.0, 1e-10));
        assert!(is_equal_eps(0.0, 0.0, 1e-10));
        // Different signs, both small
        assert!(is_equal_eps(1e-12, -1e-12, 1e-10));
        // Different signs, not small enough
        assert!(!is_equal_eps(0.1, -0.1, 1e-10));
    }
}
