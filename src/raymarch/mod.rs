//! Ray marching (sphere tracing) through implicit height fields.

mod config;
mod field;
mod marcher;

pub use config::{MarchConfig, MarchConfigError, ProbeNormalization};
pub use field::{DistanceField, TerrainField, TerrainScale};
pub use marcher::{Raymarcher, SurfaceHit};
