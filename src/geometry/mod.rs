//! Vector math, rays and the viewing camera.

mod camera;
mod vector;

pub use camera::Camera;
pub use vector::{normalized, try_normalized, MarchPosition, Ray, Vector3};
