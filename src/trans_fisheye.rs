//! Fisheye (focus + context) distortions.
//!
//! Per-axis fisheye magnifies the unit interval around a focus value while
//! keeping both interval ends fixed. The circular variant magnifies a
//! circular zone around a focus point in pixel space and leaves everything
//! outside the zone untouched.

use crate::basics::{Frame, Point, Vector2};
use crate::error::{check_size, finite, CoordError, Result};
use crate::scale::Linear;
use crate::transformer::Transformer;

/// Distort `x` towards/away from `focus` on `[min, max]`.
///
/// `y = focus ± m (d + 1) u / (d u + 1)` with `u = |x - focus| / m`, where
/// `m` is the distance from the focus to the interval end on `x`'s side.
pub fn fisheye(x: f64, focus: f64, distortion: f64, min: f64, max: f64) -> f64 {
    let left = x < focus;
    let m = side_length(left, focus, min, max);
    if m == 0.0 {
        return x;
    }
    let sign = if left { -1.0 } else { 1.0 };
    let u = (x - focus).abs() / m;
    focus + sign * m * (distortion + 1.0) * u / (distortion * u + 1.0)
}

/// Inverse of [`fisheye`] with the same parameters.
pub fn fisheye_inverse(y: f64, focus: f64, distortion: f64, min: f64, max: f64) -> f64 {
    let left = y < focus;
    let m = side_length(left, focus, min, max);
    if m == 0.0 {
        return y;
    }
    let sign = if left { -1.0 } else { 1.0 };
    let w = (y - focus).abs() / m;
    let u = w / (distortion + 1.0 - distortion * w);
    focus + sign * m * u
}

#[inline]
fn side_length(left: bool, focus: f64, min: f64, max: f64) -> f64 {
    let m = if left { focus - min } else { max - focus };
    if m == 0.0 {
        max - min
    } else {
        m
    }
}

// ============================================================================
// Per-axis fisheye
// ============================================================================

/// Focus (normalized) and distortion of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisheyeAxis {
    pub focus: f64,
    pub distortion: f64,
}

impl FisheyeAxis {
    /// `focus` is normalized, or a pixel coordinate on `[origin, origin + size]`
    /// when `visual` is set.
    pub fn new(focus: f64, distortion: f64, visual: bool, origin: f64, size: f64) -> Result<Self> {
        let focus = finite("fisheye focus", focus)?;
        let distortion = finite("fisheye distortion", distortion)?;
        if visual && !(size.is_finite() && size > 0.0) {
            return Err(CoordError::InvalidParameter {
                what: "frame size",
                value: size,
            });
        }
        let focus = if visual {
            Linear::new(origin, origin + size).invert(focus)
        } else {
            focus
        };
        Ok(Self { focus, distortion })
    }

    #[inline]
    fn apply(&self, v: f64) -> f64 {
        fisheye(v, self.focus, self.distortion, 0.0, 1.0)
    }

    #[inline]
    fn revert(&self, v: f64) -> f64 {
        fisheye_inverse(v, self.focus, self.distortion, 0.0, 1.0)
    }
}

/// Fisheye on either or both axes of the unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fisheye {
    x: Option<FisheyeAxis>,
    y: Option<FisheyeAxis>,
}

impl Fisheye {
    pub fn new(x: Option<FisheyeAxis>, y: Option<FisheyeAxis>) -> Self {
        Self { x, y }
    }

    /// Both axes, from normalized or (with `visual`) pixel focus coordinates.
    pub fn both(
        focus: Point,
        distortion_x: f64,
        distortion_y: f64,
        visual: bool,
        frame: &Frame,
    ) -> Result<Self> {
        Ok(Self::new(
            Some(FisheyeAxis::new(focus.x, distortion_x, visual, frame.x, frame.width)?),
            Some(FisheyeAxis::new(focus.y, distortion_y, visual, frame.y, frame.height)?),
        ))
    }
}

impl Transformer for Fisheye {
    fn transform(&self, v: Vector2) -> Vector2 {
        [
            self.x.map_or(v[0], |a| a.apply(v[0])),
            self.y.map_or(v[1], |a| a.apply(v[1])),
        ]
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        [
            self.x.map_or(v[0], |a| a.revert(v[0])),
            self.y.map_or(v[1], |a| a.revert(v[1])),
        ]
    }
}

// ============================================================================
// Circular fisheye
// ============================================================================

/// Radial fisheye inside a circular zone, measured in pixels.
///
/// Inside `radius` of the focus, the distance to the focus is distorted;
/// outside, points pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisheyeCircular {
    x: Linear,
    y: Linear,
    focus: Point,
    radius: f64,
    distortion: f64,
}

impl FisheyeCircular {
    pub fn new(focus: Point, radius: f64, distortion: f64, visual: bool, frame: &Frame) -> Result<Self> {
        check_size(frame.width, frame.height)?;
        let radius = finite("fisheye radius", radius)?;
        if radius <= 0.0 {
            return Err(CoordError::InvalidParameter {
                what: "fisheye radius",
                value: radius,
            });
        }
        let x = Linear::new(frame.x, frame.x + frame.width);
        let y = Linear::new(frame.y, frame.y + frame.height);
        let fx = finite("fisheye focus x", focus.x)?;
        let fy = finite("fisheye focus y", focus.y)?;
        let focus = if visual {
            Point::new(fx, fy)
        } else {
            Point::new(x.map(fx), y.map(fy))
        };
        Ok(Self {
            x,
            y,
            focus,
            radius,
            distortion: finite("fisheye distortion", distortion)?,
        })
    }

    /// Focus in pixels.
    pub fn focus(&self) -> Point {
        self.focus
    }

    fn warp(&self, v: Vector2, radial: impl Fn(f64) -> f64) -> Vector2 {
        let p = Point::new(self.x.map(v[0]), self.y.map(v[1]));
        let d = p - self.focus;
        let dist = d.length();
        if dist > self.radius || dist == 0.0 {
            return v;
        }
        let r = radial(dist);
        let theta = d.y.atan2(d.x);
        [
            self.x.invert(self.focus.x + r * theta.cos()),
            self.y.invert(self.focus.y + r * theta.sin()),
        ]
    }
}

impl Transformer for FisheyeCircular {
    fn transform(&self, v: Vector2) -> Vector2 {
        self.warp(v, |dist| fisheye(dist, 0.0, self.distortion, 0.0, self.radius))
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        self.warp(v, |dist| {
            fisheye_inverse(dist, 0.0, self.distortion, 0.0, self.radius)
        })
    }
}
