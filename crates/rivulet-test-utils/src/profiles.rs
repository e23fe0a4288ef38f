//! Seeded random initial profiles.
//!
//! Every generator takes an explicit seed and uses ChaCha8, so a failing
//! test reproduces bit for bit.

use std::f64::consts::PI;
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `len` values drawn uniformly from `range`.
pub fn random_profile(seed: u64, len: usize, range: Range<f64>) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(range.clone())).collect()
}

/// A smooth initial condition on `[0, length]`: `level` plus `modes`
/// sine modes with amplitudes drawn from `[-amplitude, amplitude]`.
pub fn random_modes(
    seed: u64,
    modes: usize,
    level: f64,
    amplitude: f64,
    length: f64,
) -> impl Fn(f64) -> f64 + Send + 'static {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..modes)
        .map(|_| amplitude * (2.0 * rng.random::<f64>() - 1.0))
        .collect();
    move |x| {
        weights
            .iter()
            .enumerate()
            .fold(level, |acc, (k, w)| {
                acc + w * ((k as f64 + 1.0) * PI * x / length).sin()
            })
    }
}
