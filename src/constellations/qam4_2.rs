//! QAM4_2 constellation (two diagonal rings)
//!
//! Fixed lookup:
//! -3 → -3-3j, -1 → -1-1j, 1 → 1+1j, 3 → 3+3j

use num_complex::Complex64;

use super::{same_point, PamLevel};
use crate::error::{ModemError, ModemResult};
use crate::traits::Constellation;

/// Two-ring QAM with both axes carrying the same PAM amplitude
#[derive(Debug, Clone, Copy, Default)]
pub struct Qam4_2;

impl Constellation for Qam4_2 {
    fn order(&self) -> usize {
        4
    }

    fn rings(&self) -> &'static [f64] {
        &[1.0, 3.0]
    }

    fn pam_to_symbol(&self, level: PamLevel) -> Complex64 {
        let v = level.value();
        Complex64::new(v, v)
    }

    fn symbol_to_pam(&self, sym: Complex64) -> ModemResult<PamLevel> {
        PamLevel::ALL
            .iter()
            .copied()
            .find(|&l| same_point(self.pam_to_symbol(l), sym))
            .ok_or(ModemError::UnrecognizedSymbol { re: sym.re, im: sym.im })
    }
}
