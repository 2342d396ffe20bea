//! Ray marching parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid ray marching parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarchConfigError {
    #[error("Step budget must be at least 1")]
    ZeroSteps,
    #[error("Parameter '{0}' must be finite and positive, got {1}")]
    NonPositive(&'static str, f64),
}

/// How the two normal-probe rays are prepared before marching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProbeNormalization {
    /// Both perturbed probe directions are renormalized.
    #[default]
    Consistent,
    /// The x probe is renormalized and the y probe is not, matching the
    /// output of older renders bit for bit.
    Legacy,
}

/// Configuration for the sphere-tracing ray marcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarchConfig {
    /// Maximum number of field evaluations per march.
    pub max_steps: u32,
    /// A field value below this counts as a surface hit.
    pub hit_epsilon: f64,
    /// Fraction of the field value taken as each step.
    ///
    /// Height-offset fields are not true distance bounds, so full steps can
    /// tunnel through thin ridges; damping trades speed for safety.
    pub step_factor: f64,
    /// Direction offset used for the finite-difference normal probes.
    pub normal_delta: f64,
    pub probe_normalization: ProbeNormalization,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            hit_epsilon: 0.1,
            step_factor: 0.2,
            normal_delta: 0.001,
            probe_normalization: ProbeNormalization::Consistent,
        }
    }
}

impl MarchConfig {
    /// Default parameters with the legacy probe preparation.
    pub fn legacy() -> Self {
        Self {
            probe_normalization: ProbeNormalization::Legacy,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), MarchConfigError> {
        if self.max_steps == 0 {
            return Err(MarchConfigError::ZeroSteps);
        }
        let scalars = [
            ("hit_epsilon", self.hit_epsilon),
            ("step_factor", self.step_factor),
            ("normal_delta", self.normal_delta),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value <= 0.0 {
                return Err(MarchConfigError::NonPositive(name, value));
            }
        }
        Ok(())
    }
}
