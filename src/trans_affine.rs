//! Affine transformation matrix.
//!
//! Backs every matrix-shaped transformer of the pipeline (translate, scale,
//! rotate, reflect, shear, matrix) and the post-conversion matrix of
//! [`PolarCoord`](crate::polar::PolarCoord).

use crate::basics::{is_equal_eps, Vector2};
use crate::error::{CoordError, Result};
use crate::transformer::Transformer;

/// Epsilon for affine matrix comparisons.
pub const AFFINE_EPSILON: f64 = 1e-14;

/// 2D affine transformation matrix.
///
/// Stores six components: `[sx, shy, shx, sy, tx, ty]` representing the
/// matrix:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Transform: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Clone, Copy)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub fn new() -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Custom matrix from six components.
    pub fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Construct from a column-major 3x3 matrix.
    ///
    /// The third row (`m[2]`, `m[5]`, `m[8]`) must be `0, 0, 1`.
    pub fn from_mat3(m: &[f64; 9]) -> Result<Self> {
        if m[2] != 0.0 || m[5] != 0.0 || m[8] != 1.0 {
            return Err(CoordError::NonAffineMatrix);
        }
        Ok(Self::new_custom(m[0], m[1], m[3], m[4], m[6], m[7]))
    }

    // ====================================================================
    // Named constructors
    // ====================================================================

    /// Rotation matrix.
    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::new_custom(ca, sa, -sa, ca, 0.0, 0.0)
    }

    /// Non-uniform scaling matrix.
    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Translation matrix.
    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Skewing (shear) matrix: `x' = x + tan(x_angle) * y`,
    /// `y' = y + tan(y_angle) * x`.
    pub fn new_skewing(x_angle: f64, y_angle: f64) -> Self {
        Self::new_custom(1.0, y_angle.tan(), x_angle.tan(), 1.0, 0.0, 0.0)
    }

    // ====================================================================
    // Operations (mutate self)
    // ====================================================================

    /// Translate.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    /// Post-multiply: `self = self * m`, i.e. `m` applies after `self`.
    pub fn multiply(&mut self, m: &TransAffine) -> &mut Self {
        let t0 = self.sx * m.sx + self.shy * m.shx;
        let t2 = self.shx * m.sx + self.sy * m.shx;
        let t4 = self.tx * m.sx + self.ty * m.shx + m.tx;
        self.shy = self.sx * m.shy + self.shy * m.sy;
        self.sy = self.shx * m.shy + self.sy * m.sy;
        self.ty = self.tx * m.shy + self.ty * m.sy + m.ty;
        self.sx = t0;
        self.shx = t2;
        self.tx = t4;
        self
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    /// Forward transform: `(x, y) -> (x', y')`.
    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let tmp = *x;
        *x = tmp * self.sx + *y * self.shx + self.tx;
        *y = tmp * self.shy + *y * self.sy + self.ty;
    }

    /// Inverse transform: `(x', y') -> (x, y)`.
    #[inline]
    pub fn inverse_transform(&self, x: &mut f64, y: &mut f64) {
        let d = self.determinant_reciprocal();
        let a = (*x - self.tx) * d;
        let b = (*y - self.ty) * d;
        *x = a * self.sy - b * self.shx;
        *y = b * self.sx - a * self.shy;
    }

    // ====================================================================
    // Auxiliary
    // ====================================================================

    /// Determinant of the 2x2 portion.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }

    /// Reciprocal of the determinant.
    #[inline]
    pub fn determinant_reciprocal(&self) -> f64 {
        1.0 / (self.sx * self.sy - self.shy * self.shx)
    }

    /// Finite, non-zero determinant.
    pub fn is_invertible(&self) -> bool {
        let d = self.determinant();
        d.is_finite() && d.abs() > AFFINE_EPSILON
    }

    /// `Ok(self)` when invertible, `SingularMatrix` otherwise.
    pub fn ensure_invertible(self) -> Result<Self> {
        if self.is_invertible() {
            Ok(self)
        } else {
            Err(CoordError::SingularMatrix {
                determinant: self.determinant(),
            })
        }
    }

    /// Check if this is an identity matrix.
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.is_equal(&TransAffine::new(), epsilon)
    }

    /// Check if two matrices are equal within epsilon.
    pub fn is_equal(&self, m: &TransAffine, epsilon: f64) -> bool {
        is_equal_eps(self.sx, m.sx, epsilon)
            && is_equal_eps(self.shy, m.shy, epsilon)
            && is_equal_eps(self.shx, m.shx, epsilon)
            && is_equal_eps(self.sy, m.sy, epsilon)
            && is_equal_eps(self.tx, m.tx, epsilon)
            && is_equal_eps(self.ty, m.ty, epsilon)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TransAffine {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, AFFINE_EPSILON)
    }
}

impl Transformer for TransAffine {
    fn transform(&self, v: Vector2) -> Vector2 {
        let [mut x, mut y] = v;
        TransAffine::transform(self, &mut x, &mut y);
        [x, y]
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        let [mut x, mut y] = v;
        self.inverse_transform(&mut x, &mut y);
        [x, y]
    }
}

// ============================================================================
// Tests
// ============================================================================
