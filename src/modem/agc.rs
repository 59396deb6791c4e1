//! Software AGC
//!
//! Loop gains in the Costas and timing stages assume a unit-power input,
//! so every capture is scaled to unit RMS first.

use num_complex::Complex64;

use crate::utils::rms;

/// Scale a buffer to unit RMS; an all-zero buffer is returned unchanged
pub fn normalize_rms(samples: &[Complex64]) -> Vec<Complex64> {
    let level = rms(samples);
    if level <= f64::MIN_POSITIVE || !level.is_finite() {
        return samples.to_vec();
    }
    samples.iter().map(|&s| s / level).collect()
}
