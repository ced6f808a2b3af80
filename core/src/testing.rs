//! Synthetic point clouds for tests and benchmarks.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::sample::{RawSample, SampleSet};

/// `n` samples drawn uniformly from the cube `[-spread, spread]^3`.
pub fn random_cloud(n: usize, spread: f64, seed: u64) -> SampleSet {
    let mut rng = StdRng::seed_from_u64(seed);

    let samples = (0..n)
        .map(|_| {
            RawSample::new(
                rng.gen_range(-spread..=spread),
                rng.gen_range(-spread..=spread),
                rng.gen_range(-spread..=spread),
            )
        })
        .collect();

    SampleSet::new(samples).expect("uniform samples are finite")
}

/// `n` samples shaped like a p orbital: two lobes along z, off the origin, in the
/// roughly 0..20 unit range the sampling service returns.
pub fn orbital_cloud(n: usize, seed: u64) -> SampleSet {
    let mut rng = StdRng::seed_from_u64(seed);

    let samples = (0..n)
        .map(|i| {
            let lobe = if i % 2 == 0 { 1.0 } else { -1.0 };
            // rejection sample a point in the unit ball
            let offset = loop {
                let candidate = [
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0f64),
                ];
                if candidate.iter().map(|c| c * c).sum::<f64>() <= 1.0 {
                    break candidate;
                }
            };

            RawSample::new(
                10.0 + 3.0 * offset[0],
                10.0 + 3.0 * offset[1],
                10.0 + lobe * 4.0 + 3.0 * offset[2],
            )
        })
        .collect();

    SampleSet::new(samples).expect("orbital samples are finite")
}
