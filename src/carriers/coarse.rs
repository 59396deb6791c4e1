//! Coarse carrier offset estimation
//!
//! Raising a QAM signal to the 4th power folds its four-fold symmetric
//! constellation onto a single tone at four times the carrier offset.
//! The FFT peak of that tone, divided by four, is the coarse estimate.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Frequency of the spectral peak of a 4th-power signal, divided by 4
///
/// Bins are read in zero-centered order so ties resolve to the most
/// negative frequency. Returns 0 for an empty buffer.
pub fn coarse_frequency(signal4: &[Complex64], sample_rate: f64) -> f64 {
    let n = signal4.len();
    if n == 0 {
        return 0.0;
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut spectrum = signal4.to_vec();
    fft.process(&mut spectrum);

    let half = n / 2;
    let mut best_bin = 0usize;
    let mut best_mag = f64::NEG_INFINITY;
    for shifted in 0..n {
        let bin = (shifted + n - half) % n;
        let mag = spectrum[bin].norm();
        if mag > best_mag {
            best_mag = mag;
            best_bin = shifted;
        }
    }

    let freq = (best_bin as f64 - half as f64) * sample_rate / n as f64;
    freq / 4.0
}

/// Coarse carrier offset of a received buffer
pub fn estimate_offset(samples: &[Complex64], sample_rate: f64) -> f64 {
    let signal4: Vec<Complex64> = samples.iter().map(|s| s.powi(4)).collect();
    let offset = coarse_frequency(&signal4, sample_rate);
    tracing::debug!(offset_hz = offset, samples = samples.len(), "coarse frequency estimate");
    offset
}
