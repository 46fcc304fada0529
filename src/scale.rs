//! Linear scale between a normalized `[0, 1]` value and a numeric range.

/// Affine map from the normalized domain `[0, 1]` onto `[start, end]`.
///
/// The range is kept exactly as given, so `start > end` describes a
/// decreasing (reflected) dimension. Values outside `[0, 1]` extrapolate;
/// nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub start: f64,
    pub end: f64,
}

impl Linear {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// A zero-span range cannot be inverted.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    /// Normalized value to range value.
    #[inline]
    pub fn map(&self, t: f64) -> f64 {
        self.start + t * (self.end - self.start)
    }

    /// Range value back to normalized value.
    #[inline]
    pub fn invert(&self, v: f64) -> f64 {
        (v - self.start) / (self.end - self.start)
    }

    /// Same range walked the other way.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_invert() {
        let s = Linear::new(10.0, 30.0);
        assert_eq!(s.map(0.0), 10.0);
        assert_eq!(s.map(0.5), 20.0);
        assert_eq!(s.map(1.0), 30.0);
        assert_eq!(s.invert(25.0), 0.75);
        assert_eq!(s.span(), 20.0);
    }

    #[test]
    fn test_extrapolates() {
        let s = Linear::new(0.0, 10.0);
        assert_eq!(s.map(1.5), 15.0);
        assert_eq!(s.invert(-5.0), -0.5);
    }

    #[test]
    fn test_reversed() {
        let s = Linear::new(0.0, 100.0).reversed();
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(1.0), 0.0);
        assert_eq!(s.invert(25.0), 0.75);
    }

    #[test]
    fn test_degenerate() {
        let s = Linear::new(3.0, 3.0);
        assert!(s.is_degenerate());
        assert!(s.invert(3.0).is_nan());
        assert!(!Linear::new(0.0, 1.0).is_degenerate());
    }
}
