//! 4PAM (real axis only)

use num_complex::Complex64;

use super::PamLevel;
use crate::error::ModemResult;
use crate::traits::Constellation;

/// Four-level amplitude modulation on the in-phase axis
#[derive(Debug, Clone, Copy, Default)]
pub struct Pam4;

impl Constellation for Pam4 {
    fn order(&self) -> usize {
        4
    }

    fn rings(&self) -> &'static [f64] {
        &[1.0, 3.0]
    }

    fn pam_to_symbol(&self, level: PamLevel) -> Complex64 {
        Complex64::new(level.value(), 0.0)
    }

    /// The quadrature component is ignored
    fn symbol_to_pam(&self, sym: Complex64) -> ModemResult<PamLevel> {
        PamLevel::from_value(sym.re)
    }
}
