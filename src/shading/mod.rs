//! Color gradients, the terrain palette and hit shading.

mod gradient;
mod lighting;
mod palette;

pub use gradient::{ColorGradient, GradientError};
pub use lighting::{shade_landscape, LightingConfig, GRID_COLOR};
pub use palette::{terrain_palette, BROWN, GOLD, GRASS, SLATE, SNOW};
