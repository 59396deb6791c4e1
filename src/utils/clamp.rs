//! Saturating conversion of baseband samples to DAC words

use num_complex::Complex64;

/// Clamp a floating point value to i16 range with saturation
#[inline]
pub fn clamp_i16(val: f64) -> i16 {
    if val >= 32767.0 {
        32767
    } else if val <= -32768.0 {
        -32768
    } else {
        val.round() as i16
    }
}

/// Interleave complex samples as I, Q, I, Q, ... DAC words
pub fn interleave_i16(samples: &[Complex64]) -> Vec<i16> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        out.push(clamp_i16(s.re));
        out.push(clamp_i16(s.im));
    }
    out
}
