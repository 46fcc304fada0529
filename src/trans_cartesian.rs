//! Rectangular transformers: cartesian placement, parallel-axes remap and
//! transposition.

use crate::basics::{Frame, Vector2};
use crate::error::{check_size, finite, CoordError, Result};
use crate::scale::Linear;
use crate::transformer::Transformer;

/// Places the unit square onto the frame: `[x + v1 * width, y + v2 * height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian {
    x: Linear,
    y: Linear,
}

impl Cartesian {
    pub fn new(frame: &Frame) -> Result<Self> {
        check_size(frame.width, frame.height)?;
        let x = finite("frame x", frame.x)?;
        let y = finite("frame y", frame.y)?;
        Ok(Self {
            x: Linear::new(x, x + frame.width),
            y: Linear::new(y, y + frame.height),
        })
    }
}

impl Transformer for Cartesian {
    fn transform(&self, v: Vector2) -> Vector2 {
        [self.x.map(v[0]), self.y.map(v[1])]
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        [self.x.invert(v[0]), self.y.invert(v[1])]
    }
}

/// Per-axis remap of `[0, 1]²` into `[x0, x1] x [y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallel {
    x: Linear,
    y: Linear,
}

impl Parallel {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self> {
        let x = Linear::new(finite("x0", x0)?, finite("x1", x1)?);
        let y = Linear::new(finite("y0", y0)?, finite("y1", y1)?);
        if x.is_degenerate() {
            return Err(CoordError::InvalidParameter {
                what: "parallel x span",
                value: x.span(),
            });
        }
        if y.is_degenerate() {
            return Err(CoordError::InvalidParameter {
                what: "parallel y span",
                value: y.span(),
            });
        }
        Ok(Self { x, y })
    }
}

impl Transformer for Parallel {
    fn transform(&self, v: Vector2) -> Vector2 {
        [self.x.map(v[0]), self.y.map(v[1])]
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        [self.x.invert(v[0]), self.y.invert(v[1])]
    }
}

/// Swaps the two components. Its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transpose;

impl Transformer for Transpose {
    fn transform(&self, v: Vector2) -> Vector2 {
        [v[1], v[0]]
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        [v[1], v[0]]
    }
}
