//! Polar family transformers.
//!
//! Map a normalized `(angle, radius)` pair onto a disc inscribed in the unit
//! square, correcting for the aspect ratio of the target frame. `PolarTheta`
//! and `PolarRho` collapse one dimension (pie charts and concentric rings),
//! `Helix` winds the angle dimension along an Archimedean spiral.

use crate::angle::move_angle;
use crate::basics::{Frame, Vector2, TWO_PI};
use crate::error::{check_size, finite, CoordError, Result};
use crate::scale::Linear;
use crate::transformer::Transformer;

/// Per-axis factors that keep a disc inscribed in a `width x height` frame.
///
/// Returns `(sx, sy)`; the longer visual axis is compressed.
pub fn aspect_scale(width: f64, height: f64) -> (f64, f64) {
    let aspect = height / width;
    if aspect > 1.0 {
        (1.0, 1.0 / aspect)
    } else {
        (aspect, 1.0)
    }
}

#[inline]
fn to_unit_square(x: f64, y: f64, sx: f64, sy: f64) -> Vector2 {
    [x * sx * 0.5 + 0.5, y * sy * 0.5 + 0.5]
}

#[inline]
fn from_unit_square(v: Vector2, sx: f64, sy: f64) -> (f64, f64) {
    ((v[0] - 0.5) * 2.0 / sx, (v[1] - 0.5) * 2.0 / sy)
}

// ============================================================================
// Polar
// ============================================================================

/// `[v1, v2] -> (angle.map(v1), radius.map(v2))` placed in the unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    angle: Linear,
    radius: Linear,
    sx: f64,
    sy: f64,
}

impl Polar {
    pub fn new(
        start_angle: f64,
        end_angle: f64,
        inner_radius: f64,
        outer_radius: f64,
        frame: &Frame,
    ) -> Result<Self> {
        check_size(frame.width, frame.height)?;
        let angle = Linear::new(
            finite("start angle", start_angle)?,
            finite("end angle", end_angle)?,
        );
        let radius = Linear::new(
            finite("inner radius", inner_radius)?,
            finite("outer radius", outer_radius)?,
        );
        if angle.is_degenerate() {
            return Err(CoordError::DegenerateAngleRange {
                start: start_angle,
                end: end_angle,
            });
        }
        if radius.is_degenerate() {
            return Err(CoordError::DegenerateRadiusRange {
                start: inner_radius,
                end: outer_radius,
            });
        }
        let (sx, sy) = aspect_scale(frame.width, frame.height);
        Ok(Self {
            angle,
            radius,
            sx,
            sy,
        })
    }

    pub fn angle(&self) -> Linear {
        self.angle
    }

    pub fn radius(&self) -> Linear {
        self.radius
    }

    /// Aspect correction factors `(sx, sy)`.
    pub fn aspect_scale(&self) -> (f64, f64) {
        (self.sx, self.sy)
    }
}

impl Transformer for Polar {
    fn transform(&self, v: Vector2) -> Vector2 {
        let theta = self.angle.map(v[0]);
        let r = self.radius.map(v[1]);
        to_unit_square(r * theta.cos(), r * theta.sin(), self.sx, self.sy)
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        let (x, y) = from_unit_square(v, self.sx, self.sy);
        let r = x.hypot(y);
        let t = y.atan2(x);
        let theta = move_angle(t, self.angle.start, self.angle.end);
        [self.angle.invert(theta), self.radius.invert(r)]
    }
}

// ============================================================================
// PolarTheta / PolarRho
// ============================================================================

/// Polar with the radius binarized: `0` stays `0`, anything else is `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarTheta(pub Polar);

impl Transformer for PolarTheta {
    fn transform(&self, v: Vector2) -> Vector2 {
        let radius = if v[1] == 0.0 { 0.0 } else { 1.0 };
        self.0.transform([v[0], radius])
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        self.0.untransform(v)
    }
}

/// Polar with the angle pinned to `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarRho(pub Polar);

impl Transformer for PolarRho {
    fn transform(&self, v: Vector2) -> Vector2 {
        self.0.transform([1.0, v[1]])
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        self.0.untransform(v)
    }
}

// ============================================================================
// Helix
// ============================================================================

/// Archimedean spiral band.
///
/// `v1` is the position along the spiral, `v2` the offset across the band
/// (one band width separates consecutive turns). The outermost band ends at
/// `outer_radius`. Round-trips for `v2` in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helix {
    start: f64,
    sweep: f64,
    inner: f64,
    growth: f64,
    band: f64,
    sx: f64,
    sy: f64,
}

impl Helix {
    pub fn new(
        start_angle: f64,
        end_angle: f64,
        inner_radius: f64,
        outer_radius: f64,
        frame: &Frame,
    ) -> Result<Self> {
        check_size(frame.width, frame.height)?;
        let start = finite("start angle", start_angle)?;
        let sweep = finite("end angle", end_angle)? - start;
        let inner = finite("inner radius", inner_radius)?;
        let outer = finite("outer radius", outer_radius)?;
        if sweep == 0.0 {
            return Err(CoordError::DegenerateAngleRange {
                start: start_angle,
                end: end_angle,
            });
        }
        if outer == inner {
            return Err(CoordError::DegenerateRadiusRange {
                start: inner_radius,
                end: outer_radius,
            });
        }
        // Spiral growth plus one trailing band spans inner..outer.
        let growth = (outer - inner) / (sweep.abs() + TWO_PI);
        let (sx, sy) = aspect_scale(frame.width, frame.height);
        Ok(Self {
            start,
            sweep,
            inner,
            growth,
            band: growth.abs() * TWO_PI,
            sx,
            sy,
        })
    }

    /// Radial distance between two consecutive turns.
    pub fn band(&self) -> f64 {
        self.band
    }

    #[inline]
    fn base_radius(&self, travelled: f64) -> f64 {
        self.inner + self.growth * travelled
    }
}

impl Transformer for Helix {
    fn transform(&self, v: Vector2) -> Vector2 {
        let travelled = v[0] * self.sweep.abs();
        let theta = self.start + self.sweep.signum() * travelled;
        let r = self.base_radius(travelled) + self.growth.signum() * v[1] * self.band;
        to_unit_square(r * theta.cos(), r * theta.sin(), self.sx, self.sy)
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        let (x, y) = from_unit_square(v, self.sx, self.sy);
        let r = x.hypot(y);
        let t = y.atan2(x);

        // Angle travelled within the first turn.
        let mut phase = if self.sweep > 0.0 {
            move_angle(t, self.start, self.start + TWO_PI) - self.start
        } else {
            self.start - move_angle(t, self.start - TWO_PI, self.start)
        };
        if phase >= TWO_PI {
            phase -= TWO_PI;
        }

        let turns = ((self.sweep.abs() - phase) / TWO_PI).floor().max(0.0);
        let offset = self.growth.signum() * (r - self.base_radius(phase)) / self.band;
        let k = offset.floor().clamp(0.0, turns);

        let travelled = phase + k * TWO_PI;
        let v2 = self.growth.signum() * (r - self.base_radius(travelled)) / self.band;
        [travelled / self.sweep.abs(), v2]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PI;

    const EPS: f64 = 1e-9;

    fn square() -> Frame {
        Frame::new(0.0, 0.0, 100.0, 100.0)
    }

    fn assert_vec_eq(a: Vector2, b: Vector2) {
        assert!(
            (a[0] - b[0]).abs() < EPS && (a[1] - b[1]).abs() < EPS,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_aspect_scale() {
        assert_eq!(aspect_scale(200.0, 100.0), (0.5, 1.0));
        assert_eq!(aspect_scale(100.0, 200.0), (1.0, 0.5));
        assert_eq!(aspect_scale(100.0, 100.0), (1.0, 1.0));
    }

    #[test]
    fn test_polar_wide_frame() {
        let start = -PI / 2.0;
        let p = Polar::new(start, 3.0 * PI / 2.0, 0.0, 1.0, &Frame::new(0.0, 0.0, 200.0, 100.0))
            .unwrap();
        assert_eq!(p.aspect_scale(), (0.5, 1.0));
        let out = p.transform([0.0, 1.0]);
        assert_vec_eq(
            out,
            [start.cos() * 0.5 * 0.5 + 0.5, start.sin() * 0.5 + 0.5],
        );
        // -π/2 lands on the y = 0 edge of the square.
        assert_vec_eq(out, [0.5, 0.0]);
    }

    #[test]
    fn test_polar_center_and_edge() {
        let p = Polar::new(0.0, TWO_PI, 0.0, 1.0, &square()).unwrap();
        assert_vec_eq(p.transform([0.3, 0.0]), [0.5, 0.5]);
        assert_vec_eq(p.transform([0.0, 1.0]), [1.0, 0.5]);
        assert_vec_eq(p.transform([0.25, 1.0]), [0.5, 1.0]);
        assert_vec_eq(p.transform([0.5, 0.5]), [0.25, 0.5]);
    }

    #[test]
    fn test_polar_round_trip() {
        let frames = [square(), Frame::new(10.0, 10.0, 300.0, 120.0), Frame::new(0.0, 0.0, 80.0, 240.0)];
        for frame in &frames {
            let p = Polar::new(-PI / 2.0, 3.0 * PI / 2.0, 0.2, 0.9, frame).unwrap();
            for v in [[0.0, 0.5], [0.1, 0.0], [0.45, 1.0], [0.9, 0.3]] {
                assert_vec_eq(p.untransform(p.transform(v)), v);
            }
        }
    }

    #[test]
    fn test_polar_partial_sweep_round_trip() {
        let p = Polar::new(PI / 4.0, 5.0 * PI / 4.0, 0.0, 1.0, &square()).unwrap();
        for v in [[0.0, 1.0], [0.5, 0.5], [0.95, 0.25]] {
            assert_vec_eq(p.untransform(p.transform(v)), v);
        }
    }

    #[test]
    fn test_polar_large_start_angle() {
        // Folding 1e11 back into the window takes one step, and the only
        // error left is the ulp of the angle itself.
        let p = Polar::new(1e11, 1e11 + PI, 0.0, 1.0, &square()).unwrap();
        for v in [[0.3, 0.5], [0.7, 0.9]] {
            let back = p.untransform(p.transform(v));
            assert!((back[0] - v[0]).abs() < 1e-3, "{back:?}");
            assert!((back[1] - v[1]).abs() < EPS);
        }
    }

    #[test]
    fn test_polar_rejects_degenerate() {
        assert!(matches!(
            Polar::new(1.0, 1.0, 0.0, 1.0, &square()),
            Err(CoordError::DegenerateAngleRange { .. })
        ));
        assert!(matches!(
            Polar::new(0.0, PI, 0.5, 0.5, &square()),
            Err(CoordError::DegenerateRadiusRange { .. })
        ));
        assert!(matches!(
            Polar::new(0.0, PI, 0.0, 1.0, &Frame::new(0.0, 0.0, 0.0, 10.0)),
            Err(CoordError::InvalidFrame { .. })
        ));
        assert!(matches!(
            Polar::new(f64::NAN, PI, 0.0, 1.0, &square()),
            Err(CoordError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_polar_theta_binarizes_radius() {
        let p = PolarTheta(Polar::new(-PI / 2.0, 3.0 * PI / 2.0, 0.0, 1.0, &square()).unwrap());
        let zero = p.transform([0.3, 0.0]);
        let tiny = p.transform([0.3, 0.0001]);
        assert!((zero[0] - tiny[0]).abs() > 1e-3 || (zero[1] - tiny[1]).abs() > 1e-3);
        assert_eq!(p.transform([0.3, 5.0]), p.transform([0.3, 1.0]));
        assert_vec_eq(zero, [0.5, 0.5]);
    }

    #[test]
    fn test_polar_rho_pins_angle() {
        let inner = Polar::new(-PI / 2.0, 3.0 * PI / 2.0, 0.0, 1.0, &square()).unwrap();
        let p = PolarRho(inner);
        assert_eq!(p.transform([0.1, 0.6]), p.transform([0.7, 0.6]));
        assert_eq!(p.transform([0.2, 0.6]), inner.transform([1.0, 0.6]));
        // Radius survives the round trip, the angle does not.
        let back = p.untransform(p.transform([0.2, 0.6]));
        assert!((back[1] - 0.6).abs() < EPS);
    }

    #[test]
    fn test_helix_endpoints() {
        let h = Helix::new(0.0, 4.0 * PI, 0.0, 1.0, &square()).unwrap();
        // Two turns plus one band: growth 1 / 6π, band 1/3.
        assert!((h.band() - 1.0 / 3.0).abs() < EPS);
        assert_vec_eq(h.transform([0.0, 0.0]), [0.5, 0.5]);
        // v1 = 1 ends on the positive x axis, outermost band edge is the rim.
        let out = h.transform([1.0, 1.0]);
        assert_vec_eq(out, [1.0, 0.5]);
    }

    #[test]
    fn test_helix_round_trip() {
        for (start, end) in [(0.0, 4.0 * PI), (PI / 2.0, -3.0 * PI), (-PI, PI / 3.0)] {
            let h = Helix::new(start, end, 0.1, 0.9, &Frame::new(0.0, 0.0, 120.0, 90.0)).unwrap();
            for v in [[0.05, 0.25], [0.3, 0.5], [0.62, 0.75], [0.97, 0.1]] {
                assert_vec_eq(h.untransform(h.transform(v)), v);
            }
        }
    }

    #[test]
    fn test_helix_shrinking_round_trip() {
        let h = Helix::new(0.0, 6.0 * PI, 1.0, 0.2, &square()).unwrap();
        for v in [[0.1, 0.4], [0.5, 0.5], [0.8, 0.2]] {
            assert_vec_eq(h.untransform(h.transform(v)), v);
        }
    }
}
