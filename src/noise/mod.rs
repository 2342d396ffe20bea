//! Noise generation module for terrain synthesis.
//!
//! A seeded gradient lattice, the coherent noise functions evaluated over it,
//! and the fractal sums that turn them into landscape heights.

mod coherent;
mod curve;
mod fractal;
mod lattice;

pub use coherent::CoherentNoise;
pub use curve::{lerp, s_curve};
pub use fractal::{FractalConfigError, FractalNoise, FractalNoiseConfig};
pub use lattice::{NoiseTable, RANGE_SIZE, SLOT_COUNT};
