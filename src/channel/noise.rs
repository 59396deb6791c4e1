//! Additive White Gaussian Noise generator
//!
//! Uses Box-Muller transform for Gaussian samples.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

/// AWGN generator with configurable per-axis power
pub struct NoiseGenerator {
    /// Standard deviation (sqrt of noise power)
    std_dev: f64,
    rng: ChaCha8Rng,
    /// Second Box-Muller output, returned on the next call
    cached: Option<f64>,
}

impl NoiseGenerator {
    /// # Arguments
    /// * `noise_power` - Variance of each real sample
    /// * `seed_rng` - Parent RNG the generator derives its own seed from
    pub fn new(noise_power: f64, seed_rng: &mut ChaCha8Rng) -> Self {
        let seed: u64 = seed_rng.gen();
        Self {
            std_dev: noise_power.max(0.0).sqrt(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            cached: None,
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Next real Gaussian sample
    pub fn next_sample(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached * self.std_dev;
        }

        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();
        // Avoid log(0)
        let u1 = u1.max(1e-10);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        self.cached = Some(r * theta.sin());
        r * theta.cos() * self.std_dev
    }

    /// Complex sample with independent I and Q, each of the configured power
    pub fn next_complex(&mut self) -> Complex64 {
        let re = self.next_sample();
        let im = self.next_sample();
        Complex64::new(re, im)
    }
}
