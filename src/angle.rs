//! Angle normalization.
//!
//! Folding arbitrary angles (typically `atan2` results) into a coordinate's
//! canonical angle window, canonicalizing start/end pairs, and measuring the
//! direction-aware angle between two vectors.

use crate::basics::{Vector2, TWO_PI};

/// Fold `theta` into `[min, max]` by whole turns.
///
/// Raises `theta` by the fewest turns that reach `min`, then lowers it by
/// the fewest turns that reach `max`. The two steps are independent, so a
/// window narrower than 2π may leave the result below `min`. Runs in
/// constant time; non-finite input is returned unchanged.
pub fn move_angle(theta: f64, min: f64, max: f64) -> f64 {
    if !theta.is_finite() {
        return theta;
    }
    let mut theta = theta;
    if theta < min {
        theta += ((min - theta) / TWO_PI).ceil() * TWO_PI;
    }
    if theta > max {
        theta -= ((theta - max) / TWO_PI).ceil() * TWO_PI;
    }
    theta
}

// ============================================================================
// AngleRange
// ============================================================================

/// Canonical angle sweep in radians, `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub start: f64,
    pub end: f64,
}

impl AngleRange {
    /// Canonicalize by raising `end` the fewest whole turns that bring it
    /// to `start` or beyond. `start` is never adjusted.
    pub fn new(start: f64, end: f64) -> Self {
        let mut end = end;
        if start.is_finite() && end.is_finite() && end < start {
            end += ((start - end) / TWO_PI).ceil() * TWO_PI;
        }
        Self { start, end }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// True when the sweep covers at least one full turn.
    #[inline]
    pub fn is_full_turn(&self) -> bool {
        self.span().abs() >= TWO_PI
    }
}

// ============================================================================
// Angle between vectors
// ============================================================================

/// Unsigned angle between two vectors in `[0, π]`.
///
/// Uses `atan2(|cross|, dot)`, which stays accurate for nearly parallel
/// vectors. A zero-length operand yields 0.
pub fn vector_angle(a: Vector2, b: Vector2) -> f64 {
    let cross = a[0] * b[1] - b[0] * a[1];
    let dot = a[0] * b[0] + a[1] * b[1];
    cross.abs().atan2(dot)
}

/// Angle swept from `from` to `to`, in `[0, 2π]`.
///
/// With `clockwise == false` the sweep follows increasing angle (positive
/// cross product); with `clockwise == true` it follows decreasing angle.
pub fn angle_to(from: Vector2, to: Vector2, clockwise: bool) -> f64 {
    let ang = vector_angle(from, to);
    let cross = from[0] * to[1] - to[0] * from[1];
    let positive = cross >= 0.0;
    if clockwise == positive {
        TWO_PI - ang
    } else {
        ang
    }
}
