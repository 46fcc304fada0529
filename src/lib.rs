//! # chart-coord
//!
//! Polar coordinate system and composable forward/inverse transforms for
//! chart layouts.
//!
//! Chart geometry is expressed in normalized data space (`[0, 1]` per
//! dimension) and mapped into pixels inside a rectangular frame. This crate
//! provides:
//!
//! - A stateful polar coordinate system that fits the largest circle or
//!   sector into a frame, with reflection, transposition and a
//!   post-conversion affine matrix
//! - Functional transformers (polar, helix, cartesian, fisheye, affine and
//!   friends) behind one [`Transformer`](transformer::Transformer) trait
//! - A pipeline composing transformers, with exact inversion in reverse
//!   order
//!
//! ## Architecture
//!
//! 1. **Foundation**: points, frames, angle folding, arc bounding boxes
//! 2. **Polar coordinate**: [`PolarCoord`](polar::PolarCoord), geometry
//!    resolved once at construction
//! 3. **Transformers**: stateless value types created from raw parameters
//! 4. **Pipeline**: [`TransformPipeline`](pipeline::TransformPipeline)
//!
//! Only construction is fallible ([`CoordError`](error::CoordError));
//! mapping and inversion are total.

// Foundation
pub mod angle;
pub mod basics;
pub mod bounding_box;
pub mod error;
pub mod scale;

// Polar coordinate system
pub mod polar;

// Transformers
pub mod trans_affine;
pub mod trans_cartesian;
pub mod trans_fisheye;
pub mod trans_polar;
pub mod transformer;

// Composition
pub mod pipeline;

pub use basics::{BoundingBox, Frame, Point, Vector2};
pub use error::{CoordError, Result};
pub use pipeline::TransformPipeline;
pub use polar::{Dim, PolarConfig, PolarCoord};
pub use transformer::{create, Transform, TransformKind, TransformSpec, Transformer};
