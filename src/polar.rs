//! Polar coordinate system.
//!
//! [`PolarCoord`] maps normalized points (x = angle fraction, y = radius
//! fraction) onto pixels inside a rectangular frame, placing the largest
//! circle (or sector) that fits, and inverts pixels back to normalized
//! points. The geometry is fixed at construction; every modifier returns a
//! new instance.

use crate::angle::{angle_to, AngleRange};
use crate::basics::{is_number_equal, BoundingBox, Frame, Point, PI, TWO_PI};
use crate::bounding_box::arc_bounding_box;
use crate::error::{check_size, finite, CoordError, Result};
use crate::scale::Linear;
use crate::trans_affine::TransAffine;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two normalized dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dim {
    X,
    Y,
}

// ============================================================================
// Configuration
// ============================================================================

fn default_start_angle() -> f64 {
    -PI / 2.0
}

fn default_end_angle() -> f64 {
    3.0 * PI / 2.0
}

/// Construction parameters of a [`PolarCoord`].
///
/// `radius` is interpreted against the largest radius that fits the frame:
/// `None` or `0` means that maximum, a value in `(0, 1]` a fraction of it,
/// anything larger an absolute pixel radius (clamped to the maximum).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PolarConfig {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_start_angle"))]
    pub start_angle: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_end_angle"))]
    pub end_angle: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inner_radius: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, alias = "isTransposed"))]
    pub transposed: bool,
}

impl PolarConfig {
    /// Full circle starting at 12 o'clock, no hole, maximal radius.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            start_angle: default_start_angle(),
            end_angle: default_end_angle(),
            inner_radius: 0.0,
            radius: None,
            transposed: false,
        }
    }

    /// Defaults centered on `frame`.
    pub fn from_frame(frame: &Frame) -> Self {
        Self::new(frame.center(), frame.width, frame.height)
    }

    pub fn with_angles(mut self, start: f64, end: f64) -> Self {
        self.start_angle = start;
        self.end_angle = end;
        self
    }

    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }
}

// ============================================================================
// PolarCoord
// ============================================================================

/// Polar coordinate system fitted into a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCoord {
    config: PolarConfig,
    one_box: BoundingBox,
    max_radius: f64,
    radius: f64,
    circle_center: Point,
    x: Linear,
    y: Linear,
    reflect_x: bool,
    reflect_y: bool,
    matrix: TransAffine,
}

/// Resolve the configured radius against the maximum that fits.
fn resolve_radius(radius: Option<f64>, max_radius: f64) -> f64 {
    match radius {
        None => max_radius,
        Some(r) if r == 0.0 => max_radius,
        Some(r) if r > 0.0 && r <= 1.0 => max_radius * r,
        Some(r) if r < 0.0 || r > max_radius => {
            log::debug!("polar: radius {} clamped to {}", r, max_radius);
            max_radius
        }
        Some(r) => r,
    }
}

impl PolarCoord {
    /// Fit the sector described by `config` into its frame.
    ///
    /// Fails on an empty or non-finite frame, non-finite angles or radii,
    /// a zero angle span, or a zero radial span (`inner_radius == 1`).
    pub fn new(config: PolarConfig) -> Result<Self> {
        check_size(config.width, config.height)?;
        let cx = finite("center x", config.center.x)?;
        let cy = finite("center y", config.center.y)?;
        let start = finite("start angle", config.start_angle)?;
        let end = finite("end angle", config.end_angle)?;
        let inner = finite("inner radius", config.inner_radius)?;
        if let Some(r) = config.radius {
            finite("radius", r)?;
        }

        let range = AngleRange::new(start, end);
        let one_box = arc_bounding_box(range);
        let one_width = one_box.width();
        let one_height = one_box.height();
        if range.span() == 0.0 || !(one_width > 0.0 && one_height > 0.0) {
            return Err(CoordError::DegenerateAngleRange {
                start: range.start,
                end: range.end,
            });
        }

        let width = config.width;
        let height = config.height;
        let left = one_box.min_x.abs() / one_width;
        let top = one_box.min_y.abs() / one_height;
        let width_binds = height / one_height > width / one_width;
        let (max_radius, circle_center) = if width_binds {
            let max_radius = width / one_width;
            let center = Point::new(
                cx - (0.5 - left) * width,
                cy - (0.5 - top) * max_radius * one_height,
            );
            (max_radius, center)
        } else {
            let max_radius = height / one_height;
            let center = Point::new(
                cx - (0.5 - left) * max_radius * one_width,
                cy - (0.5 - top) * height,
            );
            (max_radius, center)
        };

        let radius = resolve_radius(config.radius, max_radius);
        let y = Linear::new(inner * radius, radius);
        if y.is_degenerate() {
            return Err(CoordError::DegenerateRadiusRange {
                start: y.start,
                end: y.end,
            });
        }

        log::debug!(
            "polar: {} binds, max_radius={}, radius={}, center=({}, {})",
            if width_binds { "width" } else { "height" },
            max_radius,
            radius,
            circle_center.x,
            circle_center.y
        );

        Ok(Self {
            config: PolarConfig {
                start_angle: range.start,
                end_angle: range.end,
                ..config
            },
            one_box,
            max_radius,
            radius,
            circle_center,
            x: Linear::new(range.start, range.end),
            y,
            reflect_x: false,
            reflect_y: false,
            matrix: TransAffine::new(),
        })
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    /// Configuration with the canonical end angle.
    pub fn config(&self) -> &PolarConfig {
        &self.config
    }

    /// Pixel center of the circle.
    pub fn center(&self) -> Point {
        self.circle_center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Largest radius whose sector fits the frame.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Bounding box of the unit sector.
    pub fn one_box(&self) -> BoundingBox {
        self.one_box
    }

    pub fn start_angle(&self) -> f64 {
        self.config.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.config.end_angle
    }

    pub fn inner_radius(&self) -> f64 {
        self.config.inner_radius
    }

    pub fn is_transposed(&self) -> bool {
        self.config.transposed
    }

    /// Angle range (radians) of the x dimension.
    pub fn x(&self) -> Linear {
        self.x
    }

    /// Radius range (pixels) of the y dimension.
    pub fn y(&self) -> Linear {
        self.y
    }

    pub fn matrix(&self) -> &TransAffine {
        &self.matrix
    }

    pub fn is_reflected(&self, dim: Dim) -> bool {
        match dim {
            Dim::X => self.reflect_x,
            Dim::Y => self.reflect_y,
        }
    }

    #[inline]
    fn dim(&self, dim: Dim) -> &Linear {
        match dim {
            Dim::X => &self.x,
            Dim::Y => &self.y,
        }
    }

    // ====================================================================
    // Conversion
    // ====================================================================

    /// Normalized value to angle (`X`) or pixel radius (`Y`).
    #[inline]
    pub fn convert_dim(&self, value: f64, dim: Dim) -> f64 {
        self.dim(dim).map(value)
    }

    /// Angle (`X`) or pixel radius (`Y`) back to a normalized value.
    #[inline]
    pub fn invert_dim(&self, value: f64, dim: Dim) -> f64 {
        self.dim(dim).invert(value)
    }

    /// Normalized point to pixel, ignoring the matrix.
    pub fn convert_point(&self, p: Point) -> Point {
        let p = if self.config.transposed { p.swapped() } else { p };
        let angle = self.x.map(p.x);
        let r = self.y.map(p.y);
        let (sin, cos) = angle.sin_cos();
        Point::new(self.circle_center.x + cos * r, self.circle_center.y + sin * r)
    }

    /// Pixel to normalized point, ignoring the matrix.
    ///
    /// Angles within [`NUMBER_EPSILON`](crate::basics::NUMBER_EPSILON) of a
    /// full turn fold back to 0, so the seam of a full circle inverts to
    /// `x = 0`. The center inverts to `x = 0`.
    pub fn invert_point(&self, p: Point) -> Point {
        let v = p - self.circle_center;
        let (sin, cos) = self.x.start.sin_cos();
        let mut angle = angle_to([cos, sin], v.into(), self.x.end < self.x.start);
        if is_number_equal(angle, TWO_PI) {
            angle = 0.0;
        }
        let span = self.x.span();
        let x_percent = if span > 0.0 {
            angle / span
        } else {
            -angle / span
        };
        let y_percent = self.y.invert(v.length());
        let out = Point::new(x_percent, y_percent);
        if self.config.transposed {
            out.swapped()
        } else {
            out
        }
    }

    /// Normalized point to pixel, then through the matrix.
    pub fn convert(&self, p: Point) -> Point {
        let mut q = self.convert_point(p);
        self.matrix.transform(&mut q.x, &mut q.y);
        q
    }

    /// Pixel back through the inverse matrix, then to a normalized point.
    pub fn invert(&self, p: Point) -> Point {
        let mut q = p;
        self.matrix.inverse_transform(&mut q.x, &mut q.y);
        self.invert_point(q)
    }

    // ====================================================================
    // Modifiers
    // ====================================================================

    /// Append `m` around the configured center.
    fn around_center(&self, m: &TransAffine) -> TransAffine {
        let c = self.config.center;
        let mut matrix = self.matrix;
        matrix
            .multiply(&TransAffine::new_translation(-c.x, -c.y))
            .multiply(m)
            .multiply(&TransAffine::new_translation(c.x, c.y));
        matrix
    }

    /// Rotate the output by `angle` radians around the configured center.
    pub fn rotate(&self, angle: f64) -> Self {
        Self {
            matrix: self.around_center(&TransAffine::new_rotation(angle)),
            ..*self
        }
    }

    /// Scale the output around the configured center. Zero factors are
    /// rejected since the result could not be inverted.
    pub fn scale(&self, sx: f64, sy: f64) -> Result<Self> {
        let m = TransAffine::new_scaling(finite("scale x", sx)?, finite("scale y", sy)?)
            .ensure_invertible()?;
        Ok(Self {
            matrix: self.around_center(&m),
            ..*self
        })
    }

    /// Translate the output by `(dx, dy)` pixels.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let mut matrix = self.matrix;
        matrix.translate(dx, dy);
        Self { matrix, ..*self }
    }

    /// Walk `dim` the other way.
    pub fn reflect(&self, dim: Dim) -> Self {
        let mut out = *self;
        match dim {
            Dim::X => {
                out.x = self.x.reversed();
                out.reflect_x = !self.reflect_x;
            }
            Dim::Y => {
                out.y = self.y.reversed();
                out.reflect_y = !self.reflect_y;
            }
        }
        out
    }

    /// Swap which normalized component drives the angle.
    pub fn transpose(&self) -> Self {
        let mut out = *self;
        out.config.transposed = !self.config.transposed;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn square() -> PolarConfig {
        PolarConfig::new(Point::new(100.0, 100.0), 200.0, 200.0)
    }

    fn assert_point(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn assert_round_trip(coord: &PolarCoord) {
        for x in [0.0, 0.1, 0.37, 0.5, 0.93] {
            for y in [0.2, 0.5, 0.8] {
                let p = if coord.is_transposed() {
                    Point::new(y, x)
                } else {
                    Point::new(x, y)
                };
                assert_point(coord.invert(coord.convert(p)), p);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let coord = PolarCoord::new(square()).unwrap();
        assert!((coord.start_angle() + PI / 2.0).abs() < EPS);
        assert!((coord.end_angle() - 1.5 * PI).abs() < EPS);
        assert_eq!(coord.inner_radius(), 0.0);
        assert!(!coord.is_transposed());
        assert_eq!(coord.one_box(), BoundingBox::unit());
        assert_eq!(coord.max_radius(), 100.0);
        assert_eq!(coord.radius(), 100.0);
        assert_point(coord.center(), Point::new(100.0, 100.0));
        assert!(coord.matrix().is_identity(1e-14));
    }

    #[test]
    fn test_convert_point() {
        let coord = PolarCoord::new(square()).unwrap();
        // x = 0 starts at 12 o'clock.
        assert_point(coord.convert(Point::new(0.0, 1.0)), Point::new(100.0, 0.0));
        assert_point(coord.convert(Point::new(0.25, 1.0)), Point::new(200.0, 100.0));
        assert_point(coord.convert(Point::new(0.5, 0.5)), Point::new(100.0, 150.0));
        assert_point(coord.convert(Point::new(0.3, 0.0)), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_invert_point() {
        let coord = PolarCoord::new(square()).unwrap();
        assert_point(coord.invert(Point::new(200.0, 100.0)), Point::new(0.25, 1.0));
        assert_point(coord.invert(Point::new(100.0, 0.0)), Point::new(0.0, 1.0));
        // The center has no angle.
        assert_point(coord.invert(Point::new(100.0, 100.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_invert_folds_full_turn() {
        let coord = PolarCoord::new(square()).unwrap();
        // Just counter-clockwise of 12 o'clock, within the tolerance.
        let a = -PI / 2.0 - 1e-7;
        let p = Point::new(100.0 + a.cos() * 50.0, 100.0 + a.sin() * 50.0);
        assert!(coord.invert(p).x.abs() < EPS);
    }

    #[test]
    fn test_round_trip() {
        let configs = [
            square(),
            square().with_inner_radius(0.3),
            square().with_angles(PI / 4.0, 5.0 * PI / 4.0),
            square().with_angles(PI, 0.0),
            square().with_transposed(true),
            PolarConfig::new(Point::new(40.0, 300.0), 80.0, 500.0).with_radius(0.6),
        ];
        for config in configs {
            let coord = PolarCoord::new(config).unwrap();
            assert_round_trip(&coord);
            assert_round_trip(&coord.reflect(Dim::X));
            assert_round_trip(&coord.reflect(Dim::Y));
            assert_round_trip(&coord.rotate(0.7).translate(5.0, -3.0));
            assert_round_trip(&coord.scale(2.0, 0.5).unwrap());
        }
    }

    #[test]
    fn test_canonical_end_angle() {
        let coord = PolarCoord::new(square().with_angles(PI, 0.0)).unwrap();
        assert_eq!(coord.start_angle(), PI);
        assert!((coord.end_angle() - TWO_PI).abs() < EPS);
        assert_eq!(coord.config().end_angle, coord.end_angle());
    }

    #[test]
    fn test_half_circle_fit() {
        // Lower half (screen space): [-1, 1] x [0, 1]. The width binds.
        let config = PolarConfig::new(Point::new(100.0, 60.0), 200.0, 120.0).with_angles(0.0, PI);
        let coord = PolarCoord::new(config).unwrap();
        assert!((coord.max_radius() - 100.0).abs() < EPS);
        assert_point(coord.center(), Point::new(100.0, 10.0));
        let b = coord.one_box();
        assert!((b.min_x + 1.0).abs() < EPS && (b.max_x - 1.0).abs() < EPS);
        assert!(b.min_y.abs() < EPS && (b.max_y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_height_binds_off_center() {
        // Quarter 0..π/2 spans [0, 1] x [0, 1]: the circle center sits in
        // the top-left corner of the sector.
        let config =
            PolarConfig::new(Point::new(200.0, 50.0), 400.0, 100.0).with_angles(0.0, PI / 2.0);
        let coord = PolarCoord::new(config).unwrap();
        assert!((coord.max_radius() - 100.0).abs() < EPS);
        assert_point(coord.center(), Point::new(150.0, 0.0));
        assert_point(coord.convert(Point::new(0.0, 1.0)), Point::new(250.0, 0.0));
        assert_point(coord.convert(Point::new(1.0, 1.0)), Point::new(150.0, 100.0));

        // Lower half in a wide frame: centered horizontally, pinned to the top.
        let config = PolarConfig::new(Point::new(200.0, 50.0), 400.0, 100.0).with_angles(0.0, PI);
        let coord = PolarCoord::new(config).unwrap();
        assert!((coord.max_radius() - 100.0).abs() < EPS);
        assert_point(coord.center(), Point::new(200.0, 0.0));
        assert_round_trip(&coord);
    }

    #[test]
    fn test_radius_rules() {
        let r = |radius: f64| PolarCoord::new(square().with_radius(radius)).unwrap().radius();
        assert_eq!(r(0.0), 100.0);
        assert_eq!(r(0.5), 50.0);
        assert_eq!(r(1.0), 100.0);
        assert_eq!(r(40.0), 40.0);
        assert_eq!(r(1.5), 1.5);
        assert_eq!(r(150.0), 100.0);
        assert_eq!(r(-3.0), 100.0);

        // Absolute radius above a tiny maximum is clamped.
        let small = PolarConfig::new(Point::new(1.0, 1.0), 2.0, 2.0).with_radius(1.5);
        let coord = PolarCoord::new(small).unwrap();
        assert_eq!(coord.max_radius(), 1.0);
        assert_eq!(coord.radius(), 1.0);
    }

    #[test]
    fn test_dims() {
        let coord = PolarCoord::new(square().with_inner_radius(0.5)).unwrap();
        assert_eq!(coord.convert_dim(0.0, Dim::Y), 50.0);
        assert_eq!(coord.convert_dim(1.0, Dim::Y), 100.0);
        assert_eq!(coord.invert_dim(75.0, Dim::Y), 0.5);
        assert!((coord.convert_dim(0.5, Dim::X) - PI / 2.0).abs() < EPS);
        assert!((coord.invert_dim(PI / 2.0, Dim::X) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_transpose_swaps_inputs() {
        let coord = PolarCoord::new(square()).unwrap();
        let t = coord.transpose();
        assert!(t.is_transposed());
        assert!(!t.transpose().is_transposed());
        for (a, b) in [(0.2, 0.7), (0.9, 0.1), (0.5, 1.0)] {
            assert_point(t.convert(Point::new(a, b)), coord.convert(Point::new(b, a)));
        }
    }

    #[test]
    fn test_reflect() {
        let coord = PolarCoord::new(square()).unwrap();
        let r = coord.reflect(Dim::X);
        assert!(r.is_reflected(Dim::X));
        assert!(!r.is_reflected(Dim::Y));
        assert!(!r.reflect(Dim::X).is_reflected(Dim::X));
        // Clockwise: x = 0.25 lands at 9 o'clock.
        assert_point(r.convert(Point::new(0.25, 1.0)), Point::new(0.0, 100.0));

        let r = coord.reflect(Dim::Y);
        assert_point(r.convert(Point::new(0.0, 0.0)), Point::new(100.0, 0.0));
        assert_point(r.convert(Point::new(0.0, 1.0)), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_matrix_modifiers() {
        let coord = PolarCoord::new(square()).unwrap();
        // Quarter turn around the configured center moves 12 o'clock to 3.
        let rotated = coord.rotate(PI / 2.0);
        assert_point(rotated.convert(Point::new(0.0, 1.0)), Point::new(200.0, 100.0));
        // The base mapping is untouched.
        assert_point(rotated.convert_point(Point::new(0.0, 1.0)), Point::new(100.0, 0.0));

        let moved = coord.translate(10.0, 20.0);
        assert_point(moved.convert(Point::new(0.0, 1.0)), Point::new(110.0, 20.0));

        let scaled = coord.scale(0.5, 0.5).unwrap();
        assert_point(scaled.convert(Point::new(0.0, 1.0)), Point::new(100.0, 50.0));

        assert!(matches!(
            coord.scale(0.0, 1.0),
            Err(CoordError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            PolarCoord::new(square().with_angles(1.0, 1.0)),
            Err(CoordError::DegenerateAngleRange { .. })
        ));
        assert!(matches!(
            PolarCoord::new(square().with_inner_radius(1.0)),
            Err(CoordError::DegenerateRadiusRange { .. })
        ));
        assert!(matches!(
            PolarCoord::new(PolarConfig::new(Point::new(0.0, 0.0), 0.0, 10.0)),
            Err(CoordError::InvalidFrame { .. })
        ));
        assert!(matches!(
            PolarCoord::new(square().with_angles(f64::NAN, 1.0)),
            Err(CoordError::NonFinite { .. })
        ));
        assert!(matches!(
            PolarCoord::new(square().with_radius(f64::INFINITY)),
            Err(CoordError::NonFinite { what: "radius", .. })
        ));
    }

    #[test]
    fn test_from_frame() {
        let frame = Frame::new(10.0, 20.0, 300.0, 100.0);
        let config = PolarConfig::from_frame(&frame);
        assert_eq!(config.center, Point::new(160.0, 70.0));
        let coord = PolarCoord::new(config).unwrap();
        assert_eq!(coord.max_radius(), 50.0);
        assert_point(coord.center(), Point::new(160.0, 70.0));
    }
}
