//! Default terrain coloring.

use image::Rgb;

use super::gradient::ColorGradient;

pub const GRASS: Rgb<u8> = Rgb([15, 80, 10]);
pub const GOLD: Rgb<u8> = Rgb([200, 190, 20]);
pub const BROWN: Rgb<u8> = Rgb([80, 50, 10]);
pub const SLATE: Rgb<u8> = Rgb([70, 70, 80]);
pub const SNOW: Rgb<u8> = Rgb([255, 255, 255]);

/// Elevation stops for the default palette, low ground to peaks.
const TERRAIN_STOPS: [(f64, Rgb<u8>); 7] = [
    (0.0, GRASS),
    (0.4, GRASS),
    (0.5, GOLD),
    (0.6, BROWN),
    (0.65, SLATE),
    (0.66, SNOW),
    (1.0, SNOW),
];

/// Grass lowlands through a golden band and bare rock to snowy peaks.
pub fn terrain_palette() -> ColorGradient {
    match ColorGradient::from_stops(&TERRAIN_STOPS) {
        Ok(gradient) => gradient,
        Err(e) => unreachable!("built-in terrain stops are valid: {}", e),
    }
}
