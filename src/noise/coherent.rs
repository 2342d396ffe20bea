//! Lattice gradient noise over one, two and three dimensions.

use std::sync::Arc;

use glam::{DVec2, DVec3};

use super::curve::{lerp, s_curve};
use super::lattice::{LatticeCoord, NoiseTable};

/// Evaluates coherent noise against a shared [`NoiseTable`].
///
/// Evaluation keeps no per-call state, so one instance can be cloned or
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct CoherentNoise {
    table: Arc<NoiseTable>,
}

impl CoherentNoise {
    /// Creates an evaluator over an existing table.
    pub fn new(table: Arc<NoiseTable>) -> Self {
        Self { table }
    }

    /// Builds a fresh table from `seed` and wraps it.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Arc::new(NoiseTable::new(seed)))
    }

    /// The underlying lattice table.
    pub fn table(&self) -> &Arc<NoiseTable> {
        &self.table
    }

    /// Noise value for a point on a line.
    pub fn noise1(&self, x: f64) -> f64 {
        let t = &self.table;
        let cx = LatticeCoord::locate(x);

        let sx = s_curve(cx.r0);
        let u = cx.r0 * t.gradient1(t.index(cx.b0));
        let v = cx.r1 * t.gradient1(t.index(cx.b1));

        lerp(sx, u, v)
    }

    /// Noise value for a point in a plane.
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        let t = &self.table;
        let cx = LatticeCoord::locate(x);
        let cy = LatticeCoord::locate(y);

        let i = t.index(cx.b0);
        let j = t.index(cx.b1);
        let b00 = t.index(i + cy.b0);
        let b10 = t.index(j + cy.b0);
        let b01 = t.index(i + cy.b1);
        let b11 = t.index(j + cy.b1);

        let sx = s_curve(cx.r0);
        let sy = s_curve(cy.r0);

        let u = t.gradient2(b00).dot(DVec2::new(cx.r0, cy.r0));
        let v = t.gradient2(b10).dot(DVec2::new(cx.r1, cy.r0));
        let a = lerp(sx, u, v);

        let u = t.gradient2(b01).dot(DVec2::new(cx.r0, cy.r1));
        let v = t.gradient2(b11).dot(DVec2::new(cx.r1, cy.r1));
        let b = lerp(sx, u, v);

        lerp(sy, a, b)
    }

    /// Noise value for a point in space.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let t = &self.table;
        let cx = LatticeCoord::locate(x);
        let cy = LatticeCoord::locate(y);
        let cz = LatticeCoord::locate(z);

        let i = t.index(cx.b0);
        let j = t.index(cx.b1);
        let b00 = t.index(i + cy.b0);
        let b10 = t.index(j + cy.b0);
        let b01 = t.index(i + cy.b1);
        let b11 = t.index(j + cy.b1);

        let sx = s_curve(cx.r0);
        let sy = s_curve(cy.r0);
        let sz = s_curve(cz.r0);

        let corner = |slot: usize, rx: f64, ry: f64, rz: f64| {
            t.gradient3(slot).dot(DVec3::new(rx, ry, rz))
        };

        // Near z face.
        let u = corner(b00 + cz.b0, cx.r0, cy.r0, cz.r0);
        let v = corner(b10 + cz.b0, cx.r1, cy.r0, cz.r0);
        let a = lerp(sx, u, v);
        let u = corner(b01 + cz.b0, cx.r0, cy.r1, cz.r0);
        let v = corner(b11 + cz.b0, cx.r1, cy.r1, cz.r0);
        let b = lerp(sx, u, v);
        let c = lerp(sy, a, b);

        // Far z face.
        let u = corner(b00 + cz.b1, cx.r0, cy.r0, cz.r1);
        let v = corner(b10 + cz.b1, cx.r1, cy.r0, cz.r1);
        let a = lerp(sx, u, v);
        let u = corner(b01 + cz.b1, cx.r0, cy.r1, cz.r1);
        let v = corner(b11 + cz.b1, cx.r1, cy.r1, cz.r1);
        let b = lerp(sx, u, v);
        let d = lerp(sy, a, b);

        lerp(sz, c, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(step: f64, extent: f64) -> impl Iterator<Item = f64> {
        let n = (2.0 * extent / step) as usize;
        (0..=n).map(move |i| -extent + i as f64 * step)
    }

    #[test]
    fn test_noise_reproducibility() {
        let noise = CoherentNoise::from_seed(12345);
        let a = noise.noise2(3.7, -12.1);
        let b = noise.noise2(3.7, -12.1);
        assert_eq!(a.to_bits(), b.to_bits());

        let other = CoherentNoise::from_seed(12345);
        assert_eq!(a.to_bits(), other.noise2(3.7, -12.1).to_bits());
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let a = CoherentNoise::from_seed(1);
        let b = CoherentNoise::from_seed(2);
        let differs = grid(0.37, 5.0).any(|x| a.noise2(x, 0.5) != b.noise2(x, 0.5));
        assert!(differs);
    }

    #[test]
    fn test_noise_range() {
        let noise = CoherentNoise::from_seed(42);
        for x in grid(0.173, 12.0) {
            let v = noise.noise1(x);
            assert!((-1.05..=1.05).contains(&v), "noise1({}) = {}", x, v);
            for y in grid(0.31, 6.0) {
                let v = noise.noise2(x, y);
                assert!((-1.05..=1.05).contains(&v), "noise2({}, {}) = {}", x, y, v);
                let v = noise.noise3(x, y, x * 0.5 - y);
                assert!((-1.05..=1.05).contains(&v), "noise3 = {}", v);
            }
        }
    }

    #[test]
    fn test_noise_continuity() {
        let noise = CoherentNoise::from_seed(8);
        let delta = 1e-4;
        // Sweep across several cell boundaries, including the one at zero.
        for x in grid(0.0499, 4.0) {
            for y in [-1.5, -0.01, 0.0, 0.73, 2.0] {
                let d2 = (noise.noise2(x + delta, y) - noise.noise2(x, y)).abs();
                assert!(d2 < 1e-3, "noise2 jumps by {} at ({}, {})", d2, x, y);
                let d3 = (noise.noise3(x, y, x + delta) - noise.noise3(x, y, x)).abs();
                assert!(d3 < 1e-3, "noise3 jumps by {} at ({}, {})", d3, x, y);
            }
            let d1 = (noise.noise1(x + delta) - noise.noise1(x)).abs();
            assert!(d1 < 1e-3, "noise1 jumps by {} at {}", d1, x);
        }
    }

    #[test]
    fn test_noise_vanishes_on_lattice_points() {
        let noise = CoherentNoise::from_seed(77);
        for i in 0..=257 {
            let x = i as f64;
            assert_eq!(noise.noise1(x), 0.0);
            assert_eq!(noise.noise2(x, 3.0), 0.0);
            assert_eq!(noise.noise3(1.0, x, 2.0), 0.0);
        }
    }

    #[test]
    fn test_noise_wraps_every_256_cells() {
        let noise = CoherentNoise::from_seed(5);
        for x in grid(0.29, 3.0) {
            let y = 0.61;
            let a = noise.noise2(x, y);
            let b = noise.noise2(x + 256.0, y);
            let c = noise.noise2(x, y - 256.0);
            assert!((a - b).abs() < 1e-9);
            assert!((a - c).abs() < 1e-9);

            let a = noise.noise3(x, y, 0.2);
            let b = noise.noise3(x, y, 256.2);
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_far_negative_coordinates() {
        let noise = CoherentNoise::from_seed(5);
        let a = noise.noise2(-10_000.25, 0.5);
        let b = noise.noise2(-10_000.25 + 256.0 * 40.0, 0.5);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_evaluators_share_table() {
        let first = CoherentNoise::from_seed(11);
        let second = CoherentNoise::new(Arc::clone(first.table()));
        assert_eq!(first.noise3(0.3, 0.6, 0.9), second.noise3(0.3, 0.6, 0.9));
        assert_eq!(first.table().seed(), 11);
    }
}
