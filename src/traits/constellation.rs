//! Constellation trait - PAM level ↔ complex symbol mapping
//!
//! Defines how base-4 PAM levels map to transmitted points and back.
//! This trait knows nothing about framing or text.

use num_complex::Complex64;

use crate::constellations::PamLevel;
use crate::error::ModemResult;

/// Symbol alphabet mapping trait
///
/// Used by the frame builder (level → point) and the frame
/// extractor (quantized point → level).
pub trait Constellation: Send + Sync {
    /// Number of points in the constellation
    fn order(&self) -> usize;

    /// Positive per-axis magnitudes the quantizer may decide between
    fn rings(&self) -> &'static [f64];

    /// Map a PAM level to its constellation point
    fn pam_to_symbol(&self, level: PamLevel) -> Complex64;

    /// Map a quantized point back to its PAM level
    ///
    /// Points outside the alphabet yield `ModemError::UnrecognizedSymbol`.
    fn symbol_to_pam(&self, sym: Complex64) -> ModemResult<PamLevel>;
}
