//! Carrier trait - Frequency/phase generation
//!
//! Defines the local oscillator used for frequency shifts and
//! de-rotation. Pure physics - no modulation awareness.

use num_complex::Complex64;

/// Carrier oscillator trait
///
/// Implementations generate a complex exponential one sample at a time.
/// Typically a Numerically Controlled Oscillator (NCO).
pub trait Carrier: Send + Sync {
    /// Get the next exp(jφ) sample and advance phase
    fn next(&mut self) -> Complex64;

    /// Reset the oscillator phase to zero
    fn reset(&mut self);

    /// Get the current phase (radians)
    fn phase(&self) -> f64;

    /// Get the carrier frequency in Hz
    fn frequency(&self) -> f64;

    /// Retune (negative frequencies rotate clockwise)
    fn set_frequency(&mut self, freq_hz: f64);
}
