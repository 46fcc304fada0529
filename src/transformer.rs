//! Transformer protocol and factory.
//!
//! Every transform kind is a pair of pure functions over [`Vector2`]. The
//! built-in kinds form the closed [`Transform`] enum so a pipeline is a plain
//! ordered `Vec`; [`create`] builds one from a kind, its numeric parameters
//! and the layout frame.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::basics::{Frame, Point, Vector2};
use crate::error::{finite, CoordError, Result};
use crate::trans_affine::TransAffine;
use crate::trans_cartesian::{Cartesian, Parallel, Transpose};
use crate::trans_fisheye::{Fisheye, FisheyeAxis, FisheyeCircular};
use crate::trans_polar::{Helix, Polar, PolarRho, PolarTheta};

// ============================================================================
// Transformer trait
// ============================================================================

/// Forward/inverse mapping of 2-component vectors.
///
/// Both functions are total: they never panic and only produce NaN or
/// infinities at genuine singularities. `untransform(transform(v)) == v` up to
/// floating-point tolerance, except for kinds that collapse a dimension.
pub trait Transformer {
    fn transform(&self, v: Vector2) -> Vector2;
    fn untransform(&self, v: Vector2) -> Vector2;
}

// ============================================================================
// TransformKind
// ============================================================================

/// Names of the built-in transform kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TransformKind {
    Translate,
    Scale,
    Rotate,
    Reflect,
    ReflectX,
    ReflectY,
    ShearX,
    ShearY,
    Matrix,
    Transpose,
    Cartesian,
    Parallel,
    Polar,
    PolarTheta,
    PolarRho,
    Helix,
    Fisheye,
    FisheyeX,
    FisheyeY,
    FisheyeCircular,
}

impl TransformKind {
    pub const ALL: [TransformKind; 20] = [
        TransformKind::Translate,
        TransformKind::Scale,
        TransformKind::Rotate,
        TransformKind::Reflect,
        TransformKind::ReflectX,
        TransformKind::ReflectY,
        TransformKind::ShearX,
        TransformKind::ShearY,
        TransformKind::Matrix,
        TransformKind::Transpose,
        TransformKind::Cartesian,
        TransformKind::Parallel,
        TransformKind::Polar,
        TransformKind::PolarTheta,
        TransformKind::PolarRho,
        TransformKind::Helix,
        TransformKind::Fisheye,
        TransformKind::FisheyeX,
        TransformKind::FisheyeY,
        TransformKind::FisheyeCircular,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Translate => "translate",
            TransformKind::Scale => "scale",
            TransformKind::Rotate => "rotate",
            TransformKind::Reflect => "reflect",
            TransformKind::ReflectX => "reflectX",
            TransformKind::ReflectY => "reflectY",
            TransformKind::ShearX => "shearX",
            TransformKind::ShearY => "shearY",
            TransformKind::Matrix => "matrix",
            TransformKind::Transpose => "transpose",
            TransformKind::Cartesian => "cartesian",
            TransformKind::Parallel => "parallel",
            TransformKind::Polar => "polar",
            TransformKind::PolarTheta => "polarTheta",
            TransformKind::PolarRho => "polarRho",
            TransformKind::Helix => "helix",
            TransformKind::Fisheye => "fisheye",
            TransformKind::FisheyeX => "fisheyeX",
            TransformKind::FisheyeY => "fisheyeY",
            TransformKind::FisheyeCircular => "fisheyeCircular",
        }
    }

    /// Accepted parameter counts and their description for error messages.
    fn arity(self) -> (&'static [usize], &'static str) {
        match self {
            TransformKind::Translate | TransformKind::Scale => (&[2], "2"),
            TransformKind::Rotate | TransformKind::ShearX | TransformKind::ShearY => (&[1], "1"),
            TransformKind::Reflect
            | TransformKind::ReflectX
            | TransformKind::ReflectY
            | TransformKind::Transpose
            | TransformKind::Cartesian => (&[0], "0"),
            TransformKind::Matrix => (&[6, 9], "6 or 9"),
            TransformKind::Parallel
            | TransformKind::Polar
            | TransformKind::PolarTheta
            | TransformKind::PolarRho
            | TransformKind::Helix => (&[4], "4"),
            TransformKind::FisheyeX | TransformKind::FisheyeY => (&[2, 3], "2 or 3"),
            TransformKind::Fisheye | TransformKind::FisheyeCircular => (&[4, 5], "4 or 5"),
        }
    }

    fn param_count_error(self, actual: usize) -> CoordError {
        CoordError::ParamCount {
            kind: self.name(),
            expected: self.arity().1,
            actual,
        }
    }

    fn check_arity(self, params: &[f64]) -> Result<()> {
        if self.arity().0.contains(&params.len()) {
            Ok(())
        } else {
            Err(self.param_count_error(params.len()))
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self> {
        TransformKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| CoordError::UnknownTransform(s.to_string()))
    }
}

/// Declarative pipeline entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformSpec {
    pub kind: TransformKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<f64>,
}

impl TransformSpec {
    pub fn new(kind: TransformKind, params: &[f64]) -> Self {
        Self {
            kind,
            params: params.to_vec(),
        }
    }
}

// ============================================================================
// Transform
// ============================================================================

/// A built transformer.
#[derive(Clone)]
pub enum Transform {
    Affine(TransAffine),
    Transpose(Transpose),
    Cartesian(Cartesian),
    Parallel(Parallel),
    Polar(Polar),
    PolarTheta(PolarTheta),
    PolarRho(PolarRho),
    Helix(Helix),
    Fisheye(Fisheye),
    FisheyeCircular(FisheyeCircular),
    Custom(Arc<dyn Transformer + Send + Sync>),
}

impl Transform {
    /// Wrap a user transformer.
    pub fn custom<T>(t: T) -> Self
    where
        T: Transformer + Send + Sync + 'static,
    {
        Transform::Custom(Arc::new(t))
    }

    /// Build a custom transformer from a forward and an inverse closure.
    pub fn from_fns<F, G>(forward: F, inverse: G) -> Self
    where
        F: Fn(Vector2) -> Vector2 + Send + Sync + 'static,
        G: Fn(Vector2) -> Vector2 + Send + Sync + 'static,
    {
        Transform::custom(FnTransformer { forward, inverse })
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, Transform::Affine(_))
    }

    /// The underlying matrix of an affine transform.
    pub fn as_affine(&self) -> Option<&TransAffine> {
        match self {
            Transform::Affine(m) => Some(m),
            _ => None,
        }
    }
}

impl Transformer for Transform {
    fn transform(&self, v: Vector2) -> Vector2 {
        match self {
            Transform::Affine(t) => Transformer::transform(t, v),
            Transform::Transpose(t) => t.transform(v),
            Transform::Cartesian(t) => t.transform(v),
            Transform::Parallel(t) => t.transform(v),
            Transform::Polar(t) => t.transform(v),
            Transform::PolarTheta(t) => t.transform(v),
            Transform::PolarRho(t) => t.transform(v),
            Transform::Helix(t) => t.transform(v),
            Transform::Fisheye(t) => t.transform(v),
            Transform::FisheyeCircular(t) => t.transform(v),
            Transform::Custom(t) => t.transform(v),
        }
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        match self {
            Transform::Affine(t) => t.untransform(v),
            Transform::Transpose(t) => t.untransform(v),
            Transform::Cartesian(t) => t.untransform(v),
            Transform::Parallel(t) => t.untransform(v),
            Transform::Polar(t) => t.untransform(v),
            Transform::PolarTheta(t) => t.untransform(v),
            Transform::PolarRho(t) => t.untransform(v),
            Transform::Helix(t) => t.untransform(v),
            Transform::Fisheye(t) => t.untransform(v),
            Transform::FisheyeCircular(t) => t.untransform(v),
            Transform::Custom(t) => t.untransform(v),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Affine(t) => f.debug_tuple("Affine").field(t).finish(),
            Transform::Transpose(t) => f.debug_tuple("Transpose").field(t).finish(),
            Transform::Cartesian(t) => f.debug_tuple("Cartesian").field(t).finish(),
            Transform::Parallel(t) => f.debug_tuple("Parallel").field(t).finish(),
            Transform::Polar(t) => f.debug_tuple("Polar").field(t).finish(),
            Transform::PolarTheta(t) => f.debug_tuple("PolarTheta").field(t).finish(),
            Transform::PolarRho(t) => f.debug_tuple("PolarRho").field(t).finish(),
            Transform::Helix(t) => f.debug_tuple("Helix").field(t).finish(),
            Transform::Fisheye(t) => f.debug_tuple("Fisheye").field(t).finish(),
            Transform::FisheyeCircular(t) => f.debug_tuple("FisheyeCircular").field(t).finish(),
            Transform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

struct FnTransformer<F, G> {
    forward: F,
    inverse: G,
}

impl<F, G> Transformer for FnTransformer<F, G>
where
    F: Fn(Vector2) -> Vector2,
    G: Fn(Vector2) -> Vector2,
{
    fn transform(&self, v: Vector2) -> Vector2 {
        (self.forward)(v)
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        (self.inverse)(v)
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Build a transformer of `kind` from its parameters and the layout frame.
///
/// Parameter layouts:
///
/// | kind | params |
/// |---|---|
/// | `translate` | `[tx, ty]` |
/// | `scale` | `[sx, sy]` |
/// | `rotate` | `[theta]` |
/// | `reflect`, `reflectX`, `reflectY` | `[]` |
/// | `shearX`, `shearY` | `[theta]` |
/// | `matrix` | `[sx, shy, shx, sy, tx, ty]` or column-major 3x3 |
/// | `transpose`, `cartesian` | `[]` |
/// | `parallel` | `[x0, x1, y0, y1]` |
/// | `polar`, `polarTheta`, `polarRho`, `helix` | `[start, end, inner, outer]` |
/// | `fisheyeX`, `fisheyeY` | `[focus, distortion, visual?]` |
/// | `fisheye` | `[fx, fy, dx, dy, visual?]` |
/// | `fisheyeCircular` | `[fx, fy, radius, distortion, visual?]` |
///
/// `visual` is a flag: any non-zero value means the focus is in pixels.
pub fn create(kind: TransformKind, params: &[f64], frame: &Frame) -> Result<Transform> {
    kind.check_arity(params)?;
    let p = |i: usize| params[i];
    let visual = |i: usize| params.get(i).map_or(false, |v| *v != 0.0);

    let t = match kind {
        TransformKind::Translate => Transform::Affine(TransAffine::new_translation(
            finite("translate x", p(0))?,
            finite("translate y", p(1))?,
        )),
        TransformKind::Scale => Transform::Affine(
            TransAffine::new_scaling(finite("scale x", p(0))?, finite("scale y", p(1))?)
                .ensure_invertible()?,
        ),
        TransformKind::Rotate => {
            Transform::Affine(TransAffine::new_rotation(finite("rotate angle", p(0))?))
        }
        TransformKind::Reflect => Transform::Affine(TransAffine::new_scaling(-1.0, -1.0)),
        TransformKind::ReflectX => Transform::Affine(TransAffine::new_scaling(-1.0, 1.0)),
        TransformKind::ReflectY => Transform::Affine(TransAffine::new_scaling(1.0, -1.0)),
        TransformKind::ShearX => Transform::Affine(
            TransAffine::new_skewing(finite("shear angle", p(0))?, 0.0).ensure_invertible()?,
        ),
        TransformKind::ShearY => Transform::Affine(
            TransAffine::new_skewing(0.0, finite("shear angle", p(0))?).ensure_invertible()?,
        ),
        TransformKind::Matrix => {
            for &v in params {
                finite("matrix component", v)?;
            }
            let m = match *params {
                [sx, shy, shx, sy, tx, ty] => TransAffine::new_custom(sx, shy, shx, sy, tx, ty),
                [a, b, c, d, e, f, g, h, i] => TransAffine::from_mat3(&[a, b, c, d, e, f, g, h, i])?,
                _ => return Err(kind.param_count_error(params.len())),
            };
            Transform::Affine(m.ensure_invertible()?)
        }
        TransformKind::Transpose => Transform::Transpose(Transpose),
        TransformKind::Cartesian => Transform::Cartesian(Cartesian::new(frame)?),
        TransformKind::Parallel => Transform::Parallel(Parallel::new(p(0), p(1), p(2), p(3))?),
        TransformKind::Polar => Transform::Polar(Polar::new(p(0), p(1), p(2), p(3), frame)?),
        TransformKind::PolarTheta => {
            Transform::PolarTheta(PolarTheta(Polar::new(p(0), p(1), p(2), p(3), frame)?))
        }
        TransformKind::PolarRho => {
            Transform::PolarRho(PolarRho(Polar::new(p(0), p(1), p(2), p(3), frame)?))
        }
        TransformKind::Helix => Transform::Helix(Helix::new(p(0), p(1), p(2), p(3), frame)?),
        TransformKind::FisheyeX => Transform::Fisheye(Fisheye::new(
            Some(FisheyeAxis::new(p(0), p(1), visual(2), frame.x, frame.width)?),
            None,
        )),
        TransformKind::FisheyeY => Transform::Fisheye(Fisheye::new(
            None,
            Some(FisheyeAxis::new(p(0), p(1), visual(2), frame.y, frame.height)?),
        )),
        TransformKind::Fisheye => Transform::Fisheye(Fisheye::both(
            Point::new(p(0), p(1)),
            p(2),
            p(3),
            visual(4),
            frame,
        )?),
        TransformKind::FisheyeCircular => Transform::FisheyeCircular(FisheyeCircular::new(
            Point::new(p(0), p(1)),
            p(2),
            p(3),
            visual(4),
            frame,
        )?),
    };
    log::trace!("created `{}` transformer from {:?}", kind, params);
    Ok(t)
}

// ============================================================================
// Tests
// ============================================================================
