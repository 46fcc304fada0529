//! Transform pipeline.
//!
//! An ordered list of [`Transform`]s over one frame. Mapping applies each
//! transform in order; inversion undoes them in reverse order. Runs of
//! matrix transforms are folded into a single affine matrix as they are
//! pushed.

use crate::basics::{Frame, Point, Vector2};
use crate::error::{check_size, Result};
use crate::transformer::{create, Transform, TransformKind, TransformSpec, Transformer};

/// Composed forward/inverse mapping.
#[derive(Debug, Clone)]
pub struct TransformPipeline {
    frame: Frame,
    transforms: Vec<Transform>,
}

impl TransformPipeline {
    /// Empty pipeline (the identity) over `frame`.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            transforms: Vec::new(),
        }
    }

    /// Build from declarative specs, failing on the first invalid one.
    pub fn from_specs(frame: Frame, specs: &[TransformSpec]) -> Result<Self> {
        check_size(frame.width, frame.height)?;
        let mut pipeline = Self::new(frame);
        for spec in specs {
            pipeline.push(spec.kind, &spec.params)?;
        }
        log::debug!(
            "pipeline: {} specs assembled into {} transforms",
            specs.len(),
            pipeline.len()
        );
        Ok(pipeline)
    }

    /// Create a built-in transformer against this pipeline's frame and
    /// append it.
    pub fn push(&mut self, kind: TransformKind, params: &[f64]) -> Result<&mut Self> {
        let t = create(kind, params, &self.frame)?;
        Ok(self.push_transform(t))
    }

    /// Append a transform. A matrix following another matrix is folded
    /// into it.
    pub fn push_transform(&mut self, t: Transform) -> &mut Self {
        if let (Some(Transform::Affine(prev)), Some(next)) =
            (self.transforms.last_mut(), t.as_affine())
        {
            prev.multiply(next);
            log::trace!("pipeline: folded affine into {:?}", prev);
            return self;
        }
        self.transforms.push(t);
        self
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Pixel center of the frame.
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Number of transforms after folding.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Apply every transform in order.
    pub fn map(&self, v: Vector2) -> Vector2 {
        self.transforms.iter().fold(v, |v, t| t.transform(v))
    }

    /// Undo every transform in reverse order.
    pub fn invert(&self, v: Vector2) -> Vector2 {
        self.transforms.iter().rev().fold(v, |v, t| t.untransform(v))
    }

    pub fn map_point(&self, p: Point) -> Point {
        self.map(p.into()).into()
    }

    pub fn invert_point(&self, p: Point) -> Point {
        self.invert(p.into()).into()
    }
}

impl Transformer for TransformPipeline {
    fn transform(&self, v: Vector2) -> Vector2 {
        self.map(v)
    }

    fn untransform(&self, v: Vector2) -> Vector2 {
        self.invert(v)
    }
}
