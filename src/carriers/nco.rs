//! Numerically Controlled Oscillator (NCO)
//!
//! Generates exp(jφ) for frequency shifting and de-rotation.
//! Phase-continuous, frequency-adjustable.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::traits::Carrier;

/// Numerically Controlled Oscillator
#[derive(Debug, Clone)]
pub struct Nco {
    phase: f64,
    phase_inc: f64,
    freq_hz: f64,
    sample_rate: f64,
}

impl Nco {
    /// Create a new NCO
    ///
    /// # Arguments
    /// * `freq_hz` - Frequency in Hz (negative rotates clockwise)
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(freq_hz: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 2.0 * PI * freq_hz / sample_rate,
            freq_hz,
            sample_rate,
        }
    }
}

impl Carrier for Nco {
    fn next(&mut self) -> Complex64 {
        let out = Complex64::from_polar(1.0, self.phase);
        // Keep phase in [0, 2π) for numerical stability
        self.phase = (self.phase + self.phase_inc).rem_euclid(2.0 * PI);
        out
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn phase(&self) -> f64 {
        self.phase
    }

    fn frequency(&self) -> f64 {
        self.freq_hz
    }

    fn set_frequency(&mut self, freq_hz: f64) {
        self.freq_hz = freq_hz;
        self.phase_inc = 2.0 * PI * freq_hz / self.sample_rate;
    }
}

/// Shift a buffer by `freq_hz`: y[k] = x[k]·exp(j2π·f·k/fs)
pub fn mix(samples: &[Complex64], freq_hz: f64, sample_rate: f64) -> Vec<Complex64> {
    let mut nco = Nco::new(freq_hz, sample_rate);
    samples.iter().map(|&s| s * nco.next()).collect()
}
