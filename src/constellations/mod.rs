//! Constellation implementations and the text ↔ symbol mapper
//!
//! Every character travels as four base-4 digits. Each digit becomes a
//! PAM level in {-3, -1, 1, 3}, which the active modulation places on
//! the complex plane:
//! - 4QAM   (four corners of the unit square)
//! - QAM4_2 (diagonal points on two rings, |I| = |Q| ∈ {1, 3})
//! - 4PAM   (real axis only)

mod mapper;
mod pam4;
mod qam4;
mod qam4_2;

pub use mapper::{letters_to_pam, pam_to_letters, symbols_to_text, text_to_symbols};
pub use pam4::Pam4;
pub use qam4::Qam4;
pub use qam4_2::Qam4_2;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ModemError, ModemResult};
use crate::traits::Constellation;

/// Tolerance when matching a quantized point against the alphabet
const MATCH_EPS: f64 = 1e-6;

/// One base-4 digit as a PAM amplitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PamLevel {
    /// Digit 0
    M3,
    /// Digit 1
    M1,
    /// Digit 2
    P1,
    /// Digit 3
    P3,
}

impl PamLevel {
    pub const ALL: [PamLevel; 4] = [PamLevel::M3, PamLevel::M1, PamLevel::P1, PamLevel::P3];

    /// Level for a base-4 digit
    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::ALL.get(digit as usize).copied()
    }

    pub fn digit(self) -> u8 {
        match self {
            PamLevel::M3 => 0,
            PamLevel::M1 => 1,
            PamLevel::P1 => 2,
            PamLevel::P3 => 3,
        }
    }

    /// Amplitude 2·digit − 3
    pub fn value(self) -> f64 {
        2.0 * self.digit() as f64 - 3.0
    }

    /// Level whose amplitude equals `value`
    pub fn from_value(value: f64) -> ModemResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| (l.value() - value).abs() < MATCH_EPS)
            .ok_or(ModemError::UnrecognizedSymbol { re: value, im: 0.0 })
    }
}

#[inline]
fn same_point(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < MATCH_EPS
}

/// Modulation selector (runtime dispatch over the constellations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModulationType {
    #[serde(rename = "4QAM")]
    Qam4,
    #[serde(rename = "QAM4_2")]
    Qam4_2,
    #[serde(rename = "4PAM")]
    Pam4,
}

impl ModulationType {
    pub fn order(&self) -> usize {
        match self {
            Self::Qam4 => Qam4.order(),
            Self::Qam4_2 => Qam4_2.order(),
            Self::Pam4 => Pam4.order(),
        }
    }

    /// Ring magnitudes handed to the quantizer
    pub fn rings(&self) -> &'static [f64] {
        match self {
            Self::Qam4 => Qam4.rings(),
            Self::Qam4_2 => Qam4_2.rings(),
            Self::Pam4 => Pam4.rings(),
        }
    }

    /// Only the real axis carries information
    pub fn is_real_only(&self) -> bool {
        matches!(self, Self::Pam4)
    }

    #[inline]
    pub fn pam_to_symbol(&self, level: PamLevel) -> Complex64 {
        match self {
            Self::Qam4 => Qam4.pam_to_symbol(level),
            Self::Qam4_2 => Qam4_2.pam_to_symbol(level),
            Self::Pam4 => Pam4.pam_to_symbol(level),
        }
    }

    #[inline]
    pub fn symbol_to_pam(&self, sym: Complex64) -> ModemResult<PamLevel> {
        match self {
            Self::Qam4 => Qam4.symbol_to_pam(sym),
            Self::Qam4_2 => Qam4_2.symbol_to_pam(sym),
            Self::Pam4 => Pam4.symbol_to_pam(sym),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Qam4 => "4QAM",
            Self::Qam4_2 => "QAM4_2",
            Self::Pam4 => "4PAM",
        }
    }
}

impl std::fmt::Display for ModulationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pam_level_values() {
        let values: Vec<f64> = PamLevel::ALL.iter().map(|l| l.value()).collect();
        assert_eq!(values, vec![-3.0, -1.0, 1.0, 3.0]);
        for d in 0..4u8 {
            assert_eq!(PamLevel::from_digit(d).unwrap().digit(), d);
        }
        assert!(PamLevel::from_digit(4).is_none());
    }

    #[test]
    fn test_pam_level_from_value() {
        assert_eq!(PamLevel::from_value(-1.0).unwrap(), PamLevel::M1);
        assert_eq!(PamLevel::from_value(3.0).unwrap(), PamLevel::P3);
        assert!(matches!(
            PamLevel::from_value(2.0),
            Err(ModemError::UnrecognizedSymbol { .. })
        ));
    }

    #[test]
    fn test_dispatch_roundtrip_all_modulations() {
        for m in [ModulationType::Qam4, ModulationType::Qam4_2, ModulationType::Pam4] {
            for level in PamLevel::ALL {
                let sym = m.pam_to_symbol(level);
                assert_eq!(m.symbol_to_pam(sym).unwrap(), level, "{} {:?} via {}", m, level, sym);
            }
            assert_eq!(m.order(), 4);
        }
    }

    #[test]
    fn test_rings() {
        assert_eq!(ModulationType::Qam4.rings(), &[1.0]);
        assert_eq!(ModulationType::Qam4_2.rings(), &[1.0, 3.0]);
        assert_eq!(ModulationType::Pam4.rings(), &[1.0, 3.0]);
        assert!(ModulationType::Pam4.is_real_only());
    }
}
