//! Scene and render configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Vector3;
use crate::noise::{FractalConfigError, FractalNoiseConfig};
use crate::raymarch::{MarchConfig, MarchConfigError, TerrainScale};
use crate::shading::LightingConfig;

/// Invalid render configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid noise configuration: {0}")]
    Noise(#[from] FractalConfigError),
    #[error("Invalid march configuration: {0}")]
    March(#[from] MarchConfigError),
    #[error("Panel size must be between 1 and {max} pixels, got {width}x{height}")]
    PanelSize { width: u32, height: u32, max: u32 },
    #[error("Camera look direction {0:?} must be non-zero and not vertical")]
    LookDirection(Vector3),
    #[error("Vertical terrain scale must be non-zero, got {0}")]
    VerticalScale(f64),
}

/// Largest accepted panel edge, in pixels.
pub const MAX_PANEL_SIZE: u32 = 8192;

/// Camera, framing and shading parameters for one rendered image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    /// Width of each of the two panels, in pixels.
    pub panel_width: u32,
    pub panel_height: u32,
    pub eye: Vector3,
    pub look: Vector3,
    pub sky: [u8; 3],
    /// World units spanned by the top-down preview along each axis.
    pub top_down_extent: f64,
    /// Rows of the gradient strip at the bottom of the landscape panel.
    pub strip_height: u32,
    pub terrain: TerrainScale,
    pub lighting: LightingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            panel_width: 500,
            panel_height: 500,
            eye: Vector3::new(0.0, 300.0, 0.0),
            look: Vector3::new(1.0, -3.0, 5.0),
            sky: [40, 80, 255],
            top_down_extent: 10.0,
            strip_height: 10,
            terrain: TerrainScale::default(),
            lighting: LightingConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: u32| (1..=MAX_PANEL_SIZE).contains(&v);
        if !in_range(self.panel_width) || !in_range(self.panel_height) {
            return Err(ConfigError::PanelSize {
                width: self.panel_width,
                height: self.panel_height,
                max: MAX_PANEL_SIZE,
            });
        }
        let horizontal = self.look.x.hypot(self.look.z);
        if !self.look.is_finite() || horizontal == 0.0 {
            return Err(ConfigError::LookDirection(self.look));
        }
        if self.terrain.vertical == 0.0 || !self.terrain.vertical.is_finite() {
            return Err(ConfigError::VerticalScale(self.terrain.vertical));
        }
        Ok(())
    }
}

/// Everything needed to render one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    pub noise: FractalNoiseConfig,
    pub march: MarchConfig,
    pub scene: SceneConfig,
}

impl RenderConfig {
    /// Default configuration with the given noise seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            noise: FractalNoiseConfig::with_seed(seed),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.noise.validate()?;
        self.march.validate()?;
        self.scene.validate()
    }
}
