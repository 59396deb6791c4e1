//! Two-ring symbol quantizer
//!
//! The decision radius is a quarter of the distance spanned by the
//! lexicographic extremes of the block. Points inside it snap to the
//! inner ring, points on or outside it to the outer ring, keeping the
//! sign of each axis.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::utils::{lex_extremes, sign};

/// Points on the diagnostic threshold circle
pub const THRESHOLD_RING_POINTS: usize = 64;

/// Quantizer output
#[derive(Debug, Clone, Default)]
pub struct Quantized {
    pub symbols: Vec<Complex64>,
    /// Decision radius used for this block
    pub threshold: f64,
    /// Decision circle sampled for plotting; unused by the decoder
    pub threshold_ring: Vec<Complex64>,
}

/// `n` points evenly spaced on the circle of radius `threshold`
pub fn threshold_ring(threshold: f64, n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|k| Complex64::from_polar(threshold, 2.0 * PI * k as f64 / n as f64))
        .collect()
}

/// Snap a block of recovered symbols onto the ring alphabet
///
/// `rings` lists the positive per-axis amplitudes of the alphabet, e.g.
/// `[1, 3]` for QAM4_2. With a single ring every point lands on it.
pub fn quantize(symbols: &[Complex64], rings: &[f64]) -> Quantized {
    let (lo, hi) = match lex_extremes(symbols) {
        Some(extremes) => extremes,
        None => return Quantized::default(),
    };
    let inner = rings.iter().copied().fold(f64::INFINITY, f64::min);
    let outer = rings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !inner.is_finite() || !outer.is_finite() {
        return Quantized::default();
    }

    let threshold = (lo.norm() + hi.norm()) / 4.0;

    let symbols = symbols
        .iter()
        .map(|z| {
            let ring = if z.norm() < threshold { inner } else { outer };
            Complex64::new(sign(z.re) * ring, sign(z.im) * ring)
        })
        .collect();

    Quantized {
        symbols,
        threshold,
        threshold_ring: threshold_ring(threshold, THRESHOLD_RING_POINTS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_two_ring_decisions() {
        let symbols = [c(2.9, 3.2), c(-0.8, 1.1), c(-3.1, -2.7), c(0.9, -1.2)];
        let q = quantize(&symbols, &[1.0, 3.0]);
        // extremes are (-3.1-2.7j) and (2.9+3.2j)
        let expected_th = (c(-3.1, -2.7).norm() + c(2.9, 3.2).norm()) / 4.0;
        assert!((q.threshold - expected_th).abs() < 1e-12, "threshold {}", q.threshold);
        assert_eq!(
            q.symbols,
            vec![c(3.0, 3.0), c(-1.0, 1.0), c(-3.0, -3.0), c(1.0, -1.0)]
        );
    }

    #[test]
    fn test_boundary_goes_to_outer_ring() {
        // extremes (-4, 0) and (4, 0) give threshold 2
        let symbols = [c(-4.0, 0.0), c(4.0, 0.0), c(2.0, 0.0), c(0.0, -1.999)];
        let q = quantize(&symbols, &[1.0, 3.0]);
        assert_eq!(q.threshold, 2.0);
        assert_eq!(q.symbols[2], c(3.0, 0.0));
        assert_eq!(q.symbols[3], c(0.0, -1.0));

        assert_eq!(q.threshold_ring.len(), THRESHOLD_RING_POINTS);
        assert!((q.threshold_ring[0] - c(2.0, 0.0)).norm() < 1e-12);
        assert!((q.threshold_ring[THRESHOLD_RING_POINTS / 4] - c(0.0, 2.0)).norm() < 1e-12);
        assert!(q.threshold_ring.iter().all(|z| (z.norm() - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_single_ring_and_empty() {
        let q = quantize(&[c(0.2, -5.0), c(-9.0, 0.1)], &[1.0]);
        assert_eq!(q.symbols, vec![c(1.0, -1.0), c(-1.0, 1.0)]);
        let empty = quantize(&[], &[1.0, 3.0]);
        assert!(empty.symbols.is_empty());
        assert!(empty.threshold_ring.is_empty());
    }
}
