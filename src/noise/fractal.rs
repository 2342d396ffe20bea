//! Multi-octave fractal composition of coherent noise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coherent::CoherentNoise;

/// Invalid fractal noise parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FractalConfigError {
    #[error("Octaves must be between 1 and 16, got {0}")]
    Octaves(u8),
    #[error("Parameter '{0}' must be finite and positive, got {1}")]
    NonPositive(&'static str, f64),
}

/// Configuration for multi-octave fractal noise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves summed.
    pub octaves: u8,
    /// Amplitude of the first octave, in height units.
    pub amplitude: f64,
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Exponent of the smooth-bottom attenuation curve.
    pub attenuation_exponent: f64,
    /// Random seed of the noise table.
    pub seed: u64,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 7,
            amplitude: 128.0,
            frequency: 0.5,
            lacunarity: 2.0,
            persistence: 0.5,
            attenuation_exponent: 0.25,
            seed: 42,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates the default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Low, soft terrain.
    pub fn rolling_hills(seed: u64) -> Self {
        Self {
            octaves: 4,
            amplitude: 64.0,
            persistence: 0.45,
            seed,
            ..Default::default()
        }
    }

    /// Tall terrain that keeps more high-frequency detail.
    pub fn rugged(seed: u64) -> Self {
        Self {
            octaves: 9,
            amplitude: 160.0,
            persistence: 0.55,
            seed,
            ..Default::default()
        }
    }

    /// Checks that the parameters describe a usable fractal sum.
    pub fn validate(&self) -> Result<(), FractalConfigError> {
        if !(1..=16).contains(&self.octaves) {
            return Err(FractalConfigError::Octaves(self.octaves));
        }
        let scalars = [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
            ("attenuation_exponent", self.attenuation_exponent),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value <= 0.0 {
                return Err(FractalConfigError::NonPositive(name, value));
            }
        }
        Ok(())
    }
}

/// Terrain height field built from octaves of 2D coherent noise.
#[derive(Debug, Clone)]
pub struct FractalNoise {
    noise: CoherentNoise,
    config: FractalNoiseConfig,
}

impl FractalNoise {
    /// Creates a fractal field with its own table built from `config.seed`.
    pub fn new(config: FractalNoiseConfig) -> Self {
        let noise = CoherentNoise::from_seed(config.seed);
        Self { noise, config }
    }

    /// Creates a fractal field over an existing noise evaluator.
    ///
    /// `config.seed` is ignored; the evaluator's table is used as is.
    pub fn with_noise(noise: CoherentNoise, config: FractalNoiseConfig) -> Self {
        Self { noise, config }
    }

    pub fn config(&self) -> &FractalNoiseConfig {
        &self.config
    }

    pub fn noise(&self) -> &CoherentNoise {
        &self.noise
    }

    /// Landscape elevation at `(x, z)`.
    pub fn fractal_height(&self, x: f64, z: f64) -> f64 {
        let mut amplitude = self.config.amplitude;
        let mut scale = self.config.frequency;
        let mut height = 0.0;

        for _ in 0..self.config.octaves {
            height += amplitude * self.noise.noise2(scale * x, scale * z);
            amplitude *= self.config.persistence;
            scale *= self.config.lacunarity;
        }

        height
    }

    /// Landscape elevation at `(x, z)` with fine detail damped where the
    /// coarser octaves sit low, giving smoother valleys under sharp peaks.
    pub fn fractal_height_smooth_bottom(&self, x: f64, z: f64) -> f64 {
        let mut amplitude = self.config.amplitude;
        let mut scale = self.config.frequency;
        let mut height = 0.0;

        for _ in 0..self.config.octaves {
            let part = self.noise.noise2(scale * x, scale * z);
            // Map [-1, 1] to [0, 1]; the clamp guards interpolation overshoot.
            let level = ((part + 1.0) / 2.0).max(0.0);
            let attenuation = level.powf(self.config.attenuation_exponent);
            height += amplitude * part;
            amplitude *= self.config.persistence * attenuation;
            scale *= self.config.lacunarity;
        }

        height
    }
}
