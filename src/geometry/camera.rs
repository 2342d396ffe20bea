//! Pinhole camera that maps panel pixels to view rays.

use super::vector::{normalized, Ray, Vector3};

/// Orthonormal viewing basis anchored at an eye point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector3,
    pub look: Vector3,
    pub right: Vector3,
    pub up: Vector3,
}

impl Camera {
    /// Builds a camera at `eye` looking along `look`, with world +Y as the
    /// reference vertical.
    ///
    /// # Panics
    /// If `look` is zero or parallel to the vertical axis.
    pub fn new(eye: Vector3, look: Vector3) -> Self {
        let look = normalized(look);
        let right = normalized(Vector3::Y.cross(look));
        let up = normalized(look.cross(right));
        Self {
            eye,
            look,
            right,
            up,
        }
    }

    /// Ray through pixel `(x, y)` of a `width × height` panel.
    ///
    /// The panel spans one unit of view-plane width at unit distance, with
    /// `y` growing downwards.
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let w = width as f64;
        let h = height as f64;
        let view = normalized(Vector3::new(
            (x as f64 - w / 2.0) / w,
            -(y as f64 - h / 2.0) / h,
            1.0,
        ));
        let direction = self.look + self.right * view.x + self.up * view.y;
        Ray::new(self.eye, direction)
    }
}
