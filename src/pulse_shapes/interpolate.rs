//! Fractional-delay interpolation
//!
//! Evaluates a sampled signal between samples by convolving a local
//! window with a unit-rate SRRC kernel shifted by the fractional part
//! of the requested time.

use super::srrc_kernel;
use crate::error::{ModemError, ModemResult};

/// Evaluate `samples` at fractional index `t`
///
/// The window `samples[t0 - l ..= t0 + l]` with `l = half_symbols·sps`
/// must lie inside the buffer; otherwise `InsufficientMargin` is returned.
pub fn interpolate(
    samples: &[f64],
    t: f64,
    half_symbols: usize,
    samples_per_symbol: usize,
    rolloff: f64,
) -> ModemResult<f64> {
    let l = half_symbols * samples_per_symbol;
    let t0 = t.floor();
    let tau = t - t0;
    let index = t0 as i64;

    if !t.is_finite() || index < l as i64 || index as usize + l + 1 > samples.len() {
        return Err(ModemError::InsufficientMargin {
            index,
            len: samples.len(),
            window: l,
        });
    }

    let kernel = srrc_kernel(l, rolloff, 1, tau);
    let start = index as usize - l;
    let window = &samples[start..start + 2 * l + 1];

    // center tap of the full convolution
    Ok(window
        .iter()
        .zip(kernel.iter().rev())
        .map(|(x, h)| x * h)
        .sum())
}
