//! Baseband channel simulator
//!
//! Applies the impairments a real link adds between TX and RX:
//! carrier frequency offset, a static phase rotation, gain, a late
//! capture start, and AWGN at a target SNR. Seeded, so every run with
//! the same settings produces the same samples.

mod noise;

pub use noise::NoiseGenerator;

use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::carriers::mix;
use crate::utils::{db_to_power, rms};

/// Impairment settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpairmentConfig {
    /// Carrier frequency offset (Hz)
    pub frequency_offset: f64,
    /// Static phase rotation (radians)
    pub phase: f64,
    /// Linear amplitude gain
    pub gain: f64,
    /// Samples dropped from the start of the stream before capture
    pub delay: usize,
    /// Signal-to-noise ratio in dB; `None` disables noise
    pub snr_db: Option<f64>,
    /// RNG seed for the noise
    pub seed: u64,
}

impl Default for ImpairmentConfig {
    fn default() -> Self {
        Self {
            frequency_offset: 0.0,
            phase: 0.0,
            gain: 1.0,
            delay: 0,
            snr_db: None,
            seed: 0,
        }
    }
}

/// Seeded impairment channel
pub struct Channel {
    config: ImpairmentConfig,
    sample_rate: f64,
    rng: ChaCha8Rng,
}

impl Channel {
    pub fn new(config: ImpairmentConfig, sample_rate: f64) -> Self {
        Self {
            config,
            sample_rate,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    pub fn config(&self) -> &ImpairmentConfig {
        &self.config
    }

    /// Pass a TX stream through the channel
    ///
    /// The output is `delay` samples shorter than the input. Noise power
    /// is set from the measured power of the impaired signal.
    pub fn apply(&mut self, samples: &[Complex64]) -> Vec<Complex64> {
        let captured = samples.get(self.config.delay..).unwrap_or(&[]);
        let rotation = Complex64::from_polar(self.config.gain, self.config.phase);
        let rotated: Vec<Complex64> = captured.iter().map(|&s| s * rotation).collect();
        let mut out = mix(&rotated, self.config.frequency_offset, self.sample_rate);

        if let Some(snr_db) = self.config.snr_db {
            let signal_power = rms(&out).powi(2);
            let per_axis = signal_power / db_to_power(snr_db) / 2.0;
            let mut noise = NoiseGenerator::new(per_axis, &mut self.rng);
            for s in out.iter_mut() {
                *s += noise.next_complex();
            }
            tracing::debug!(snr_db, noise_std = noise.std_dev(), "added channel noise");
        }
        out
    }
}
