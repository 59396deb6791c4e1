//! Barker code headers
//!
//! Barker sequences have aperiodic autocorrelation sidelobes of at most
//! one, which makes the frame start stand out sharply in correlation.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::constellations::ModulationType;

/// Supported header codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarkerCode {
    /// [+1, +1, +1, -1, -1, +1, -1]
    #[serde(rename = "barker7")]
    Barker7,
    /// [+1, +1, +1, -1, -1, -1, +1, -1, -1, +1, -1]
    #[serde(rename = "barker11")]
    Barker11,
    /// [+1, +1, +1, +1, +1, -1, -1, +1, +1, -1, +1, -1, +1]
    #[serde(rename = "barker13")]
    Barker13,
}

static BARKER7: [i8; 7] = [1, 1, 1, -1, -1, 1, -1];
static BARKER11: [i8; 11] = [1, 1, 1, -1, -1, -1, 1, -1, -1, 1, -1];
static BARKER13: [i8; 13] = [1, 1, 1, 1, 1, -1, -1, 1, 1, -1, 1, -1, 1];

impl BarkerCode {
    /// Returns the Barker sequence as a static slice of +1/-1 values.
    pub fn sequence(&self) -> &'static [i8] {
        match self {
            BarkerCode::Barker7 => &BARKER7,
            BarkerCode::Barker11 => &BARKER11,
            BarkerCode::Barker13 => &BARKER13,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence().len()
    }

    /// Look up a code by length
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            7 => Some(BarkerCode::Barker7),
            11 => Some(BarkerCode::Barker11),
            13 => Some(BarkerCode::Barker13),
            _ => None,
        }
    }

    /// Header symbols for `modulation`
    ///
    /// QAM4_2 uses the outer ring (×3 on both axes), 4PAM the real axis
    /// only (×3), and 4QAM a slightly boosted ±1.1 on both axes.
    pub fn header(&self, modulation: ModulationType) -> Vec<Complex64> {
        self.sequence()
            .iter()
            .map(|&b| {
                let b = b as f64;
                match modulation {
                    ModulationType::Qam4_2 => Complex64::new(3.0 * b, 3.0 * b),
                    ModulationType::Pam4 => Complex64::new(3.0 * b, 0.0),
                    ModulationType::Qam4 => Complex64::new(1.1 * b, 1.1 * b),
                }
            })
            .collect()
    }
}

/// Aperiodic autocorrelation for lags 0..len
pub fn autocorrelation(seq: &[i8]) -> Vec<i32> {
    (0..seq.len())
        .map(|lag| {
            seq.iter()
                .zip(seq.iter().skip(lag))
                .map(|(&a, &b)| a as i32 * b as i32)
                .sum()
        })
        .collect()
}
