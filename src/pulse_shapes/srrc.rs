//! Square Root Raised Cosine (SRRC) pulse
//!
//! Used for TX pulse shaping and RX matched filtering. When convolved
//! with itself it produces (near) zero ISI at symbol centers.

use crate::traits::PulseShape;
use std::f64::consts::PI;

/// Perturbation that keeps every tap away from the formula's singularities
const EPS: f64 = 1e-8;

/// Square Root Raised Cosine filter
#[derive(Debug, Clone)]
pub struct SquareRootRaisedCosine {
    coeffs: Vec<f64>,
    span: usize,
    samples_per_symbol: usize,
    rolloff: f64,
}

impl SquareRootRaisedCosine {
    /// Create a new SRRC filter centered on its middle tap
    ///
    /// # Arguments
    /// * `samples_per_symbol` - Oversampling factor P
    /// * `rolloff` - Excess bandwidth β (0 is replaced by a tiny epsilon)
    /// * `span` - Half-width L in symbols; the kernel has 2·L·P+1 taps
    pub fn new(samples_per_symbol: usize, rolloff: f64, span: usize) -> Self {
        Self::with_offset(samples_per_symbol, rolloff, span, 0.0)
    }

    /// Create an SRRC filter whose taps are sampled `offset` samples late
    pub fn with_offset(samples_per_symbol: usize, rolloff: f64, span: usize, offset: f64) -> Self {
        Self {
            coeffs: srrc_kernel(span, rolloff, samples_per_symbol, offset),
            span,
            samples_per_symbol,
            rolloff,
        }
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    pub fn rolloff(&self) -> f64 {
        self.rolloff
    }
}

impl PulseShape for SquareRootRaisedCosine {
    fn filter_len(&self) -> usize {
        self.coeffs.len()
    }

    fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    fn span_symbols(&self) -> usize {
        self.span
    }
}

/// Sample the SRRC impulse response
///
/// Tap `j` is evaluated at `k = j - L·P + offset` (plus a tiny epsilon so
/// that `k = 0` and `4βk/P = ±1` never hit the formula's poles). The
/// result has `2·L·P + 1` taps and is not renormalized.
pub fn srrc_kernel(half_symbols: usize, rolloff: f64, samples_per_symbol: usize, offset: f64) -> Vec<f64> {
    let beta = if rolloff == 0.0 { EPS } else { rolloff };
    let p = samples_per_symbol as f64;
    let half = (half_symbols * samples_per_symbol) as f64;
    let len = 2 * half_symbols * samples_per_symbol + 1;

    (0..len)
        .map(|j| {
            let k = j as f64 - half + EPS + offset;
            let x = k / p;
            let num = ((1.0 + beta) * PI * x).cos() + ((1.0 - beta) * PI * x).sin() / (4.0 * beta * x);
            let den = PI * (1.0 - 16.0 * (beta * x).powi(2));
            4.0 * beta / p.sqrt() * num / den
        })
        .collect()
}
