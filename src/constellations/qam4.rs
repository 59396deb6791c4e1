//! 4QAM constellation
//!
//! Fixed lookup:
//! -3 → -1-1j, -1 → -1+1j, 1 → 1-1j, 3 → 1+1j

use num_complex::Complex64;

use super::{same_point, PamLevel};
use crate::error::{ModemError, ModemResult};
use crate::traits::Constellation;

/// Four-point QAM on the unit square
#[derive(Debug, Clone, Copy, Default)]
pub struct Qam4;

impl Constellation for Qam4 {
    fn order(&self) -> usize {
        4
    }

    fn rings(&self) -> &'static [f64] {
        &[1.0]
    }

    fn pam_to_symbol(&self, level: PamLevel) -> Complex64 {
        match level {
            PamLevel::M3 => Complex64::new(-1.0, -1.0),
            PamLevel::M1 => Complex64::new(-1.0, 1.0),
            PamLevel::P1 => Complex64::new(1.0, -1.0),
            PamLevel::P3 => Complex64::new(1.0, 1.0),
        }
    }

    fn symbol_to_pam(&self, sym: Complex64) -> ModemResult<PamLevel> {
        PamLevel::ALL
            .iter()
            .copied()
            .find(|&l| same_point(self.pam_to_symbol(l), sym))
            .ok_or(ModemError::UnrecognizedSymbol { re: sym.re, im: sym.im })
    }
}
