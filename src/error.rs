//! Error type for coordinate and transformer construction.
//!
//! Mapping functions never fail; only building a coordinate system or a
//! transformer from raw parameters can.

use thiserror::Error;

/// Errors raised while constructing coordinate systems and transformers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("frame must have finite, positive size (got {width} x {height})")]
    InvalidFrame { width: f64, height: f64 },

    #[error("{what} must be finite (got {value})")]
    NonFinite { what: &'static str, value: f64 },

    #[error("invalid {what} (got {value})")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("angle range [{start}, {end}] has zero span")]
    DegenerateAngleRange { start: f64, end: f64 },

    #[error("radius range [{start}, {end}] has zero span")]
    DegenerateRadiusRange { start: f64, end: f64 },

    #[error("`{kind}` expects {expected} parameters (got {actual})")]
    ParamCount {
        kind: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("matrix is not invertible (determinant {determinant})")]
    SingularMatrix { determinant: f64 },

    #[error("3x3 matrix has a projective row; only affine matrices are supported")]
    NonAffineMatrix,

    #[error("unknown transform `{0}`")]
    UnknownTransform(String),
}

pub type Result<T> = std::result::Result<T, CoordError>;

/// Reject NaN and infinities.
pub(crate) fn finite(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoordError::NonFinite { what, value })
    }
}

/// Reject sizes that are not finite and strictly positive.
pub(crate) fn check_size(width: f64, height: f64) -> Result<()> {
    if crate::basics::is_valid_size(width, height) {
        Ok(())
    } else {
        Err(CoordError::InvalidFrame { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_checks() {
        let e = CoordError::ParamCount {
            kind: "polar",
            expected: "4",
            actual: 2,
        };
        assert_eq!(e.to_string(), "`polar` expects 4 parameters (got 2)");

        let e = CoordError::DegenerateAngleRange {
            start: 1.0,
            end: 1.0,
        };
        assert_eq!(e.to_string(), "angle range [1, 1] has zero span");

        assert_eq!(finite("radius", 2.0), Ok(2.0));
        assert!(matches!(
            finite("radius", f64::NAN),
            Err(CoordError::NonFinite { what: "radius", .. })
        ));
        assert!(check_size(1.0, 1.0).is_ok());
        assert_eq!(
            check_size(0.0, 5.0),
            Err(CoordError::InvalidFrame {
                width: 0.0,
                height: 5.0
            })
        );

        let e = CoordError::UnknownTransform("warp".into());
        assert_eq!(e.to_string(), "unknown transform `warp`");
    }
}
