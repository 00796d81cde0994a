//! Input generation shared by the tracker benchmarks.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `passes` index sequences of `k` values drawn from `[0, bits)`.
pub fn random_passes(bits: u32, k: u32, passes: usize, seed: u64) -> Vec<Vec<i64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..passes)
        .map(|_| (0..k).map(|_| rng.random_range(0..bits) as i64).collect())
        .collect()
}
