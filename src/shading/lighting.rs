//! Directional lighting for ray-marched terrain hits.

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::geometry::{normalized, Vector3};
use crate::raymarch::SurfaceHit;

use super::gradient::ColorGradient;

/// Color of the survey grid drawn over the terrain.
pub const GRID_COLOR: Rgb<u8> = Rgb([0, 255, 255]);

/// Lighting and terrain tinting parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightingConfig {
    /// Direction towards the sun; normalized before use.
    pub to_sun: Vector3,
    /// Light level of surfaces facing away from the sun (0-1).
    pub ambient: f64,
    /// How far a fully level surface shifts up the palette.
    pub steepness_bump: f64,
    /// Draw grid lines every `grid_spacing` world units, if set.
    pub grid_spacing: Option<u32>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            to_sun: Vector3::new(2.0, 1.0, -1.0),
            ambient: 0.3,
            steepness_bump: 0.2,
            grid_spacing: Some(64),
        }
    }
}

/// Color for a terrain surface hit.
///
/// The palette is indexed by elevation, pushed upwards on level ground so
/// flat tops pick up the rock and snow bands, then scaled by a
/// Lambert-plus-ambient illumination term.
pub fn shade_landscape(
    hit: &SurfaceHit,
    palette: &ColorGradient,
    lighting: &LightingConfig,
    vertical_scale: f64,
) -> Rgb<u8> {
    let point = hit.point;
    let normal = hit.normal;

    if let Some(spacing) = lighting.grid_spacing {
        if on_grid_line(point.x, spacing) || on_grid_line(point.z, spacing) {
            return GRID_COLOR;
        }
    }

    let elevation = 128.0 + point.y / vertical_scale;
    let lit = normalized(lighting.to_sun).dot(normal).max(0.0);
    let illumination = lighting.ambient + (1.0 - lighting.ambient) * lit;
    let bump = normal.y * lighting.steepness_bump;
    let shade = palette.color_at(elevation / 256.0 + bump);

    let channel = |c: u8| ((c as f64 * illumination) as i32).clamp(0, 255) as u8;
    Rgb([channel(shade.0[0]), channel(shade.0[1]), channel(shade.0[2])])
}

/// True when the truncated coordinate is a multiple of `spacing`.
///
/// A power-of-two spacing gives the same lines as masking the low bits.
fn on_grid_line(coordinate: f64, spacing: u32) -> bool {
    spacing > 0 && (coordinate as i64).rem_euclid(spacing as i64) == 0
}
