//! Scalar fields the ray marcher walks through.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector3;
use crate::noise::FractalNoise;

/// A scalar field whose value approximates the distance to a surface.
///
/// Positive values are outside (above) the surface, values near zero are on
/// it. The field only has to be a usable step heuristic, not an exact
/// distance bound.
pub trait DistanceField {
    fn distance(&self, point: Vector3) -> f64;
}

impl<F> DistanceField for F
where
    F: Fn(Vector3) -> f64,
{
    #[inline]
    fn distance(&self, point: Vector3) -> f64 {
        self(point)
    }
}

/// Scales applied when sampling terrain heights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TerrainScale {
    /// World-to-noise scale for the x and z axes.
    pub horizontal: f64,
    /// Noise-to-world scale for heights.
    pub vertical: f64,
}

impl Default for TerrainScale {
    fn default() -> Self {
        Self {
            horizontal: 0.01,
            vertical: 0.75,
        }
    }
}

/// Height-offset field over the smooth-bottom fractal landscape.
///
/// The value at a point is how far it sits above the terrain directly
/// below it.
#[derive(Debug, Clone)]
pub struct TerrainField {
    noise: FractalNoise,
    scale: TerrainScale,
}

impl TerrainField {
    pub fn new(noise: FractalNoise, scale: TerrainScale) -> Self {
        Self { noise, scale }
    }

    pub fn scale(&self) -> TerrainScale {
        self.scale
    }

    /// World-space terrain height under `(x, z)`.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        self.scale.vertical
            * self.noise.fractal_height_smooth_bottom(
                x * self.scale.horizontal,
                z * self.scale.horizontal,
            )
    }
}

impl DistanceField for TerrainField {
    fn distance(&self, point: Vector3) -> f64 {
        point.y - self.height_at(point.x, point.z)
    }
}
