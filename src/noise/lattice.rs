//! Gradient lattice shared by all coherent noise evaluators.

use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of distinct lattice cells along each axis.
pub const RANGE_SIZE: usize = 0x100;
/// Mask that wraps a cell index into `0..RANGE_SIZE`.
pub const RANGE_MASK: i64 = 0xff;
/// Table length: the first `RANGE_SIZE + 2` slots are repeated after the
/// first `RANGE_SIZE`, so neighbour lookups never need a bounds branch.
pub const SLOT_COUNT: usize = RANGE_SIZE + RANGE_SIZE + 2;

/// Gradients shorter than this are redrawn before normalizing.
const MIN_GRADIENT_LENGTH: f64 = 1e-6;

/// Immutable permutation and gradient tables for 1D, 2D and 3D noise.
///
/// Built once from a seed and shared read-only (usually behind an `Arc`)
/// by every [`CoherentNoise`](super::CoherentNoise) evaluator.
#[derive(Debug, Clone)]
pub struct NoiseTable {
    seed: u64,
    indices: Box<[usize; SLOT_COUNT]>,
    gradients1: Box<[f64; SLOT_COUNT]>,
    gradients2: Box<[DVec2; SLOT_COUNT]>,
    gradients3: Box<[DVec3; SLOT_COUNT]>,
}

impl NoiseTable {
    /// Builds a table from a seed. The same seed always yields the same table.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut indices = Box::new([0usize; SLOT_COUNT]);
        let mut gradients1 = Box::new([0.0f64; SLOT_COUNT]);
        let mut gradients2 = Box::new([DVec2::ZERO; SLOT_COUNT]);
        let mut gradients3 = Box::new([DVec3::ZERO; SLOT_COUNT]);

        for i in 0..RANGE_SIZE {
            indices[i] = i;
            // A unit "vector" in one dimension is just a sign.
            gradients1[i] = if rng.random::<bool>() { 1.0 } else { -1.0 };
            gradients2[i] = random_unit2(&mut rng);
            gradients3[i] = random_unit3(&mut rng);
        }

        // Fisher-Yates over the identity permutation.
        for i in (1..RANGE_SIZE).rev() {
            let j = rng.random_range(0..=i);
            indices.swap(i, j);
        }

        for i in 0..RANGE_SIZE + 2 {
            indices[RANGE_SIZE + i] = indices[i];
            gradients1[RANGE_SIZE + i] = gradients1[i];
            gradients2[RANGE_SIZE + i] = gradients2[i];
            gradients3[RANGE_SIZE + i] = gradients3[i];
        }

        Self {
            seed,
            indices,
            gradients1,
            gradients2,
            gradients3,
        }
    }

    /// Seed the table was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub(crate) fn index(&self, slot: usize) -> usize {
        self.indices[slot]
    }

    #[inline]
    pub(crate) fn gradient1(&self, slot: usize) -> f64 {
        self.gradients1[slot]
    }

    #[inline]
    pub(crate) fn gradient2(&self, slot: usize) -> DVec2 {
        self.gradients2[slot]
    }

    #[inline]
    pub(crate) fn gradient3(&self, slot: usize) -> DVec3 {
        self.gradients3[slot]
    }
}

fn random_unit2(rng: &mut ChaCha8Rng) -> DVec2 {
    loop {
        let v = DVec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
        let len = v.length();
        if len >= MIN_GRADIENT_LENGTH {
            return v / len;
        }
    }
}

fn random_unit3(rng: &mut ChaCha8Rng) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let len = v.length();
        if len >= MIN_GRADIENT_LENGTH {
            return v / len;
        }
    }
}

/// Position of one coordinate relative to the lattice.
///
/// `b0`/`b1` are the wrapped indices of the cell's lower and upper corner,
/// `r0`/`r1` the offsets from those corners to the sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LatticeCoord {
    pub b0: usize,
    pub b1: usize,
    pub r0: f64,
    pub r1: f64,
}

impl LatticeCoord {
    /// Splits a coordinate into its wrapped cell index and fractional offset.
    ///
    /// Uses an explicit floor so negative coordinates land in the cell below
    /// zero instead of being truncated toward it.
    #[inline]
    pub fn locate(coord: f64) -> Self {
        let cell = coord.floor();
        let b0 = ((cell as i64) & RANGE_MASK) as usize;
        let b1 = ((b0 as i64 + 1) & RANGE_MASK) as usize;
        let r0 = coord - cell;
        Self {
            b0,
            b1,
            r0,
            r1: r0 - 1.0,
        }
    }
}
