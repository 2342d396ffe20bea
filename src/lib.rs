//! Procedural landscape renderer.
//!
//! This crate builds terrain from fractal coherent noise, finds it with a
//! sphere-tracing ray marcher, and colors it through a piecewise color
//! gradient.

pub mod geometry;
pub mod noise;
pub mod raymarch;
pub mod shading;
pub mod pipeline;
pub mod export;

pub use geometry::{Camera, Ray, Vector3};
pub use noise::{CoherentNoise, FractalNoise, FractalNoiseConfig, NoiseTable};
pub use raymarch::{DistanceField, MarchConfig, ProbeNormalization, Raymarcher, SurfaceHit, TerrainField};
pub use shading::{ColorGradient, GradientError, LightingConfig};
pub use pipeline::{Canvas, Pipeline, RenderConfig, RenderContext, RenderStage, SceneConfig};
