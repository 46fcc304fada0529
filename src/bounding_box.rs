//! Bounding box of a circular wedge.
//!
//! Computes the axis-aligned box enclosing the arc swept by an angle range
//! on the unit circle, together with the circle center.

use crate::angle::AngleRange;
use crate::basics::{BoundingBox, Point, PI};

/// Angular step between arc samples (10 degrees).
pub const ARC_SAMPLE_STEP: f64 = PI / 18.0;

/// Bounding box of `{(cos θ, sin θ) : θ between range.start and range.end}
/// ∪ {(0, 0)}`.
///
/// Sweeps of a full turn or more return the unit box exactly. Otherwise the
/// arc is sampled at both endpoints and every [`ARC_SAMPLE_STEP`] from the
/// smaller endpoint, so extrema at multiples of π/2 are only exact when a
/// sample lands on them.
pub fn arc_bounding_box(range: AngleRange) -> BoundingBox {
    if range.is_full_turn() {
        return BoundingBox::unit();
    }

    let AngleRange { start, end } = range;

    let lo = start.min(end);
    let hi = start.max(end);

    let mut points = vec![
        Point::new(0.0, 0.0),
        Point::new(start.cos(), start.sin()),
        Point::new(end.cos(), end.sin()),
    ];
    // Sample count is fixed up front: at large magnitudes adding the step
    // may not move `theta` at all.
    let samples = ((hi - lo) / ARC_SAMPLE_STEP).ceil() as usize;
    let mut theta = lo;
    for _ in 0..samples {
        points.push(Point::new(theta.cos(), theta.sin()));
        theta += ARC_SAMPLE_STEP;
    }

    // Never empty: the origin and both endpoints are always present.
    BoundingBox::from_points(points).unwrap_or_else(BoundingBox::unit)
}
