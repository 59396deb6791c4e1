//! PulseShape trait - Spectral shaping / ISI control
//!
//! The same kernel is used for TX pulse shaping, RX matched filtering
//! and (at unit oversampling) fractional-delay interpolation.

use crate::utils::convolve_same;

/// Pulse shaping filter trait
pub trait PulseShape: Send + Sync {
    /// Length of the filter in samples
    fn filter_len(&self) -> usize;

    /// Get the filter coefficients
    fn coefficients(&self) -> &[f64];

    /// Filter span in symbols (each side of center)
    fn span_symbols(&self) -> usize;

    /// Filter a whole buffer, keeping the output aligned with the input
    fn filter_block(&self, samples: &[f64]) -> Vec<f64> {
        convolve_same(samples, self.coefficients())
    }

    /// Largest tap value
    fn peak(&self) -> f64 {
        self.coefficients()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
