//! Piecewise color gradients.

use image::Rgb;
use thiserror::Error;

use crate::noise::{lerp, s_curve};

/// Errors raised when building a [`ColorGradient`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    #[error("Point array must be same length as color array ({points} points, {colors} colors)")]
    LengthMismatch { points: usize, colors: usize },
    #[error("Gradient needs at least one control point")]
    Empty,
    #[error("Control points must be non-decreasing: {previous} is followed by {next}")]
    Unordered { previous: f64, next: f64 },
}

/// Maps positions in [0, 1] to colors by easing between control points.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradient {
    colors: Vec<Rgb<u8>>,
    points: Vec<f64>,
}

impl ColorGradient {
    pub fn new(colors: Vec<Rgb<u8>>, points: Vec<f64>) -> Result<Self, GradientError> {
        if colors.len() != points.len() {
            return Err(GradientError::LengthMismatch {
                points: points.len(),
                colors: colors.len(),
            });
        }
        if points.is_empty() {
            return Err(GradientError::Empty);
        }
        for pair in points.windows(2) {
            if !(pair[0] <= pair[1]) {
                return Err(GradientError::Unordered {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self { colors, points })
    }

    /// Builds a gradient from `(position, color)` stops.
    pub fn from_stops(stops: &[(f64, Rgb<u8>)]) -> Result<Self, GradientError> {
        let (points, colors) = stops.iter().copied().unzip();
        Self::new(colors, points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Color at `position`.
    ///
    /// Positions at or before the first stop get the first color; positions
    /// at or past 1.0, or past the last stop, get the last color.
    pub fn color_at(&self, position: f64) -> Rgb<u8> {
        let first = self.colors[0];
        let last = self.colors[self.colors.len() - 1];

        if position < 0.0 || position <= self.points[0] {
            return first;
        }
        if position >= 1.0 || position > self.points[self.points.len() - 1] {
            return last;
        }

        // Cannot run off the end: position <= last point here.
        let mut index = 0;
        while position > self.points[index] {
            index += 1;
        }
        if index == 0 {
            return first;
        }

        let low = self.points[index - 1];
        let high = self.points[index];
        let t = (position - low) / (high - low);
        blend(s_curve(t), self.colors[index - 1], self.colors[index])
    }
}

/// Per-channel interpolation, truncating toward zero.
fn blend(t: f64, from: Rgb<u8>, to: Rgb<u8>) -> Rgb<u8> {
    let channel = |i: usize| lerp(t, from.0[i] as f64, to.0[i] as f64) as u8;
    Rgb([channel(0), channel(1), channel(2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([200, 10, 10]);

    #[test]
    fn test_length_mismatch() {
        let result = ColorGradient::new(vec![BLACK, WHITE], vec![0.0]);
        assert_eq!(
            result,
            Err(GradientError::LengthMismatch {
                points: 1,
                colors: 2
            })
        );
    }

    #[test]
    fn test_empty_and_unordered() {
        assert_eq!(ColorGradient::new(vec![], vec![]), Err(GradientError::Empty));
        assert!(matches!(
            ColorGradient::new(vec![BLACK, WHITE], vec![0.6, 0.2]),
            Err(GradientError::Unordered { .. })
        ));
        assert!(matches!(
            ColorGradient::new(vec![BLACK, WHITE], vec![0.0, f64::NAN]),
            Err(GradientError::Unordered { .. })
        ));
    }

    #[test]
    fn test_boundaries_clamp() {
        let g = ColorGradient::new(vec![RED, BLACK, WHITE], vec![0.2, 0.5, 0.8]).unwrap();
        assert_eq!(g.color_at(-1.0), RED);
        assert_eq!(g.color_at(0.0), RED);
        assert_eq!(g.color_at(0.2), RED);
        assert_eq!(g.color_at(0.9), WHITE);
        assert_eq!(g.color_at(1.0), WHITE);
        assert_eq!(g.color_at(2.0), WHITE);
    }

    #[test]
    fn test_interpolation_uses_s_curve_and_truncates() {
        let g = ColorGradient::new(vec![BLACK, WHITE], vec![0.0, 1.0]).unwrap();
        assert_eq!(g.color_at(0.5), Rgb([127, 127, 127]));
        // s_curve(0.25) = 0.15625, 255 * 0.15625 = 39.84
        assert_eq!(g.color_at(0.25), Rgb([39, 39, 39]));
        // Exactly on an interior stop gives that stop's color.
        let g = ColorGradient::new(vec![BLACK, RED, WHITE], vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(g.color_at(0.5), RED);
    }

    #[test]
    fn test_equal_colors_interpolate_exactly() {
        let g = ColorGradient::from_stops(&[(0.0, RED), (0.4, RED), (1.0, WHITE)]).unwrap();
        assert_eq!(g.color_at(0.2), RED);
        assert_eq!(g.color_at(0.123), RED);
    }

    #[test]
    fn test_single_stop() {
        let g = ColorGradient::new(vec![RED], vec![0.5]).unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(g.color_at(0.1), RED);
        assert_eq!(g.color_at(0.7), RED);
    }
}
