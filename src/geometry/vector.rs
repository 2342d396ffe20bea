//! Vector helpers, rays and the march position accumulator.

use glam::DVec3;

/// Three-component vector value type used throughout the crate.
pub type Vector3 = DVec3;

/// Returns `v` scaled to unit length.
///
/// # Panics
/// If `v` has zero or non-finite length. Callers must never hand a
/// degenerate direction to this function.
pub fn normalized(v: Vector3) -> Vector3 {
    let len = v.length();
    assert!(
        len > 0.0 && len.is_finite(),
        "cannot normalize vector {:?} of length {}",
        v,
        len
    );
    v / len
}

/// Returns `v` scaled to unit length, or `None` when `v` is degenerate.
pub fn try_normalized(v: Vector3) -> Option<Vector3> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// A half line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    direction: Vector3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// # Panics
    /// If `direction` is the zero vector.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: normalized(direction),
        }
    }

    /// Creates a ray, or `None` if `direction` cannot be normalized.
    pub fn try_new(origin: Vector3, direction: Vector3) -> Option<Self> {
        Some(Self {
            origin,
            direction: try_normalized(direction)?,
        })
    }

    /// Creates a ray without renormalizing `direction`.
    ///
    /// Only used for the legacy normal probe, whose direction is
    /// intentionally left slightly off unit length.
    pub(crate) fn with_raw_direction(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }
}

/// Mutable position accumulator advanced by the ray marcher.
///
/// This is the one place a vector is updated in place; everywhere else
/// vectors are plain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchPosition {
    x: f64,
    y: f64,
    z: f64,
}

impl MarchPosition {
    pub fn new(start: Vector3) -> Self {
        Self {
            x: start.x,
            y: start.y,
            z: start.z,
        }
    }

    /// Adds the offset `(dx, dy, dz)` in place.
    #[inline]
    pub fn add(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Moves `distance` units along `direction`.
    #[inline]
    pub fn advance(&mut self, direction: Vector3, distance: f64) {
        self.add(
            distance * direction.x,
            distance * direction.y,
            distance * direction.z,
        );
    }

    #[inline]
    pub fn get(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}
