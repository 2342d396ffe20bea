//! Sphere tracing through a scalar field, with finite-difference normals.

use crate::geometry::{try_normalized, MarchPosition, Ray, Vector3};

use super::config::{MarchConfig, ProbeNormalization};
use super::field::DistanceField;

/// Surface point found by a ray, with its estimated normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vector3,
    /// Unit normal, oriented towards the viewer.
    pub normal: Vector3,
}

/// Per-march state: where the ray has got to and how many steps remain.
#[derive(Debug, Clone, Copy)]
struct MarchState {
    position: MarchPosition,
    steps_left: u32,
}

/// Ray marcher over a borrowed field.
#[derive(Debug, Clone)]
pub struct Raymarcher<'a, F: ?Sized> {
    field: &'a F,
    config: MarchConfig,
}

impl<'a, F: DistanceField + ?Sized> Raymarcher<'a, F> {
    pub fn new(field: &'a F, config: MarchConfig) -> Self {
        Self { field, config }
    }

    pub fn config(&self) -> &MarchConfig {
        &self.config
    }

    /// Walks `ray` until the field drops below the hit threshold.
    ///
    /// Returns the first position where that happens, or `None` if the step
    /// budget runs out first (the ray escaped to the sky).
    pub fn march(&self, ray: &Ray) -> Option<Vector3> {
        let direction = ray.direction();
        let mut state = MarchState {
            position: MarchPosition::new(ray.origin),
            steps_left: self.config.max_steps,
        };

        while state.steps_left > 0 {
            let point = state.position.get();
            let distance = self.field.distance(point);
            if distance < self.config.hit_epsilon {
                return Some(point);
            }
            state
                .position
                .advance(direction, distance * self.config.step_factor);
            state.steps_left -= 1;
        }

        None
    }

    /// Finds where the ray from `eye` along `direction` meets the surface and
    /// estimates the surface normal there.
    ///
    /// The normal comes from two probe rays nudged along x and y. A miss by
    /// either probe, or probes that land on the primary hit itself, make the
    /// whole call a miss: a hit without a usable normal cannot be shaded.
    /// A probe whose offset cancels the direction to zero is a miss too.
    ///
    /// With [`ProbeNormalization::Consistent`], a ray along the y axis never
    /// yields a normal: the renormalized y probe coincides with the ray.
    ///
    /// # Panics
    /// If `direction` is the zero vector.
    pub fn find_intersection(&self, eye: Vector3, direction: Vector3) -> Option<SurfaceHit> {
        let ray = Ray::new(eye, direction);
        let point = self.march(&ray)?;

        let dir = ray.direction();
        let delta = self.config.normal_delta;

        // A probe offset can cancel the ray direction entirely.
        let right_probe = Ray::try_new(eye, Vector3::new(dir.x + delta, dir.y, dir.z))?;
        let up_direction = Vector3::new(dir.x, dir.y + delta, dir.z);
        let up_probe = match self.config.probe_normalization {
            ProbeNormalization::Consistent => Ray::try_new(eye, up_direction)?,
            ProbeNormalization::Legacy => {
                try_normalized(up_direction)?;
                Ray::with_raw_direction(eye, up_direction)
            }
        };

        let right_point = self.march(&right_probe)?;
        let up_point = self.march(&up_probe)?;

        let up = try_normalized(point - up_point)?;
        let right = try_normalized(point - right_point)?;
        let mut normal = try_normalized(up.cross(right))?;

        if normal.dot(dir) > 0.0 {
            normal = -normal;
        }

        Some(SurfaceHit { point, normal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FractalNoise, FractalNoiseConfig};
    use crate::raymarch::{TerrainField, TerrainScale};

    fn plane(p: Vector3) -> f64 {
        p.y
    }

    #[test]
    fn test_plane_hit_straight_down() {
        let marcher = Raymarcher::new(&plane, MarchConfig::default());
        let ray = Ray::new(Vector3::new(0.0, 10.0, 0.0), -Vector3::Y);
        let hit = marcher.march(&ray).expect("ray should reach the plane");
        assert!(hit.y.abs() < 0.1);
        assert!(hit.x.abs() < 1e-12 && hit.z.abs() < 1e-12);
    }

    #[test]
    fn test_plane_miss_straight_up() {
        let marcher = Raymarcher::new(&plane, MarchConfig::default());
        let ray = Ray::new(Vector3::new(0.0, 10.0, 0.0), Vector3::Y);
        assert!(marcher.march(&ray).is_none());
        assert!(marcher
            .find_intersection(Vector3::new(0.0, 10.0, 0.0), Vector3::Y)
            .is_none());
    }

    #[test]
    fn test_step_budget_bounds_march() {
        let config = MarchConfig {
            max_steps: 3,
            ..Default::default()
        };
        let marcher = Raymarcher::new(&plane, config);
        let ray = Ray::new(Vector3::new(0.0, 10.0, 0.0), -Vector3::Y);
        assert!(marcher.march(&ray).is_none());
    }

    #[test]
    fn test_eye_below_threshold_hits_immediately() {
        let marcher = Raymarcher::new(&plane, MarchConfig::default());
        let eye = Vector3::new(1.0, 0.05, 2.0);
        let ray = Ray::new(eye, Vector3::new(0.0, -1.0, 1.0));
        assert_eq!(marcher.march(&ray), Some(eye));
        // All three marches stop at the eye, so no normal can be derived.
        assert!(marcher.find_intersection(eye, Vector3::new(0.0, -1.0, 1.0)).is_none());
    }

    #[test]
    fn test_plane_normal_points_up() {
        let marcher = Raymarcher::new(&plane, MarchConfig::default());
        let eye = Vector3::new(0.0, 10.0, 0.0);
        for direction in [
            Vector3::new(0.0, -1.0, 1.0),
            Vector3::new(0.3, -1.0, 2.0),
            Vector3::new(1.0, -3.0, 5.0),
            Vector3::new(-0.5, -1.0, 1.0),
            Vector3::new(0.0, -1.0, -1.0),
        ] {
            let hit = marcher
                .find_intersection(eye, direction)
                .expect("oblique ray should hit the plane");
            assert!(hit.point.y.abs() < 0.1);
            assert!((hit.normal.length() - 1.0).abs() < 1e-9);
            // Within about 3 degrees of vertical.
            assert!(
                hit.normal.y > 0.998,
                "normal {:?} for direction {:?}",
                hit.normal,
                direction
            );
        }
    }

    #[test]
    fn test_tight_threshold_gives_accurate_normal() {
        let config = MarchConfig {
            hit_epsilon: 1e-4,
            normal_delta: 0.01,
            ..Default::default()
        };
        let marcher = Raymarcher::new(&plane, config);
        let hit = marcher
            .find_intersection(Vector3::new(0.0, 10.0, 0.0), Vector3::new(1.0, -3.0, 5.0))
            .unwrap();
        assert!(hit.normal.y > 0.999_999);
    }

    #[test]
    fn test_straight_down_has_no_normal() {
        // With both probes renormalized, the y probe collapses onto the
        // primary ray and the finite difference is empty.
        let marcher = Raymarcher::new(&plane, MarchConfig::default());
        assert!(marcher
            .find_intersection(Vector3::new(0.0, 10.0, 0.0), -Vector3::Y)
            .is_none());
    }

    #[test]
    fn test_probe_offset_cancelling_direction_is_a_miss() {
        let config = MarchConfig {
            normal_delta: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let eye = Vector3::new(0.0, 10.0, 0.0);

        let marcher = Raymarcher::new(&plane, config.clone());
        // Up probe: (0, -1, 0) + (0, 1, 0) is the zero vector.
        assert!(marcher.march(&Ray::new(eye, -Vector3::Y)).is_some());
        assert!(marcher.find_intersection(eye, -Vector3::Y).is_none());
        // Right probe: (-1, 0, 0) + (1, 0, 0) is the zero vector.
        let wall = |p: Vector3| p.x + 5.0;
        let wall_marcher = Raymarcher::new(&wall, config.clone());
        assert!(wall_marcher.march(&Ray::new(eye, -Vector3::X)).is_some());
        assert!(wall_marcher.find_intersection(eye, -Vector3::X).is_none());

        let legacy = Raymarcher::new(
            &plane,
            MarchConfig {
                probe_normalization: ProbeNormalization::Legacy,
                ..config
            },
        );
        assert!(legacy.find_intersection(eye, -Vector3::Y).is_none());
    }

    #[test]
    fn test_legacy_probe_still_finds_oblique_normal() {
        let marcher = Raymarcher::new(&plane, MarchConfig::legacy());
        let hit = marcher
            .find_intersection(Vector3::new(0.0, 10.0, 0.0), Vector3::new(1.0, -3.0, 5.0))
            .unwrap();
        assert!(hit.normal.y > 0.99);
    }

    #[test]
    fn test_tilted_plane_normal() {
        // Plane through the origin with normal (0, 1, -1)/sqrt(2).
        let tilted = |p: Vector3| (p.y - p.z) / std::f64::consts::SQRT_2;
        let config = MarchConfig {
            hit_epsilon: 1e-4,
            normal_delta: 0.01,
            ..Default::default()
        };
        let marcher = Raymarcher::new(&tilted, config);
        let hit = marcher
            .find_intersection(Vector3::new(0.0, 10.0, 0.0), Vector3::new(0.2, -1.0, 0.3))
            .unwrap();
        let expected = Vector3::new(0.0, 1.0, -1.0).normalize();
        assert!(hit.normal.dot(expected) > 0.999, "normal {:?}", hit.normal);
    }

    #[test]
    fn test_terrain_view_from_above_hits() {
        let field = TerrainField::new(
            FractalNoise::new(FractalNoiseConfig::with_seed(42)),
            TerrainScale::default(),
        );
        let marcher = Raymarcher::new(&field, MarchConfig::default());
        let eye = Vector3::new(0.0, 300.0, 0.0);
        let hit = marcher
            .find_intersection(eye, Vector3::new(1.0, -3.0, 5.0))
            .expect("steep downward ray should reach the terrain");
        assert!(field.distance(hit.point) < 0.1);
        assert!(hit.point.y < eye.y);
    }
}
