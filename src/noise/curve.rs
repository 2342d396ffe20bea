//! Interpolation helpers shared by the noise and gradient code.

/// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Cubic ease curve `3t² - 2t³`.
///
/// Maps [0, 1] onto [0, 1] with zero slope at both ends, so blends weighted
/// by it meet smoothly at lattice cell and gradient stop boundaries.
#[inline]
pub fn s_curve(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(0.0, 3.0, 7.0), 3.0);
        assert_eq!(lerp(1.0, 3.0, 7.0), 7.0);
        assert_eq!(lerp(0.5, 3.0, 7.0), 5.0);
    }

    #[test]
    fn test_s_curve_shape() {
        assert_eq!(s_curve(0.0), 0.0);
        assert_eq!(s_curve(1.0), 1.0);
        assert_eq!(s_curve(0.5), 0.5);
        assert!(s_curve(0.25) < 0.25);
        assert!(s_curve(0.75) > 0.75);
    }
}
