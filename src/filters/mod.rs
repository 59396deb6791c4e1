//! FIR filters
//!
//! Equiripple lowpass design for the Costas loop branches and a
//! delay-line FIR that applies the taps one sample at a time.

mod remez;

pub use remez::{costas_lowpass, RemezSpec, DEFAULT_COSTAS_TAPS};

/// Costas branch passband edge (fraction of the sample rate, 0.3·Nyquist)
pub const COSTAS_PASSBAND_EDGE: f64 = 0.15;

/// Costas branch stopband edge (fraction of the sample rate, 0.4·Nyquist)
pub const COSTAS_STOPBAND_EDGE: f64 = 0.2;

/// Streaming FIR filter with its own delay line
#[derive(Debug, Clone)]
pub struct FirFilter {
    taps: Vec<f64>,
    history: Vec<f64>,
}

impl FirFilter {
    pub fn new(taps: Vec<f64>) -> Self {
        let history = vec![0.0; taps.len()];
        Self { taps, history }
    }

    /// Push one sample and return the filtered output
    #[inline]
    pub fn push(&mut self, sample: f64) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.rotate_left(1);
        let last = self.history.len() - 1;
        self.history[last] = sample;

        // newest sample meets tap 0
        self.taps
            .iter()
            .rev()
            .zip(self.history.iter())
            .map(|(c, h)| c * h)
            .sum()
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        for x in self.history.iter_mut() {
            *x = 0.0;
        }
    }
}

/// Magnitude response of `taps` at normalized frequency `f` (cycles/sample)
pub fn magnitude_response(taps: &[f64], f: f64) -> f64 {
    let w = 2.0 * std::f64::consts::PI * f;
    let (re, im) = taps
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (n, &c)| {
            let (s, co) = (w * n as f64).sin_cos();
            (re + c * co, im - c * s)
        });
    (re * re + im * im).sqrt()
}
