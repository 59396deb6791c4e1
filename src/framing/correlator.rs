//! Header correlator
//!
//! The real and imaginary axes are correlated against the header
//! independently. Each axis reports the indices where |correlation|
//! reaches the trigger, which lands on the last header symbol. The sign
//! of the peak tells the extractor whether that axis came out inverted.
//!
//! Payload symbols can correlate above the trigger too, so peaks are
//! picked strongest first and each kept peak masks every candidate
//! within one frame body of it. Consecutive headers sit a full frame
//! apart, and any window inside a frame is within half a frame of one
//! of its bounding headers.

use num_complex::Complex64;

use crate::config::ModemConfig;
use crate::constellations::ModulationType;
use crate::error::{ModemError, ModemResult};
use crate::utils::correlate_full;

/// One correlation peak on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHit {
    /// Symbol index of the last header symbol
    pub index: usize,
    /// Signed correlation value at the peak
    pub value: f64,
}

/// Matched real and imaginary peaks for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncEvent {
    pub real: AxisHit,
    pub imag: AxisHit,
}

impl SyncEvent {
    /// Indices packed as `real + j·imag`
    pub fn packed_index(&self) -> Complex64 {
        Complex64::new(self.real.index as f64, self.imag.index as f64)
    }

    /// Peak values packed as `real + j·imag`
    pub fn packed_value(&self) -> Complex64 {
        Complex64::new(self.real.value, self.imag.value)
    }
}

/// Per-axis header correlator
#[derive(Debug, Clone)]
pub struct Correlator {
    header_re: Vec<f64>,
    header_im: Vec<f64>,
    trigger: f64,
    max_hits: usize,
    /// Symbols masked on each side of a kept peak
    spacing: usize,
    modulation: ModulationType,
}

/// Strongest-first peak picking; a kept peak masks `spacing` symbols either side
///
/// Ties go to the earlier index. The result is in index order.
fn pick_peaks(mut candidates: Vec<AxisHit>, spacing: usize) -> Vec<AxisHit> {
    candidates.sort_by(|a, b| {
        b.value
            .abs()
            .total_cmp(&a.value.abs())
            .then(a.index.cmp(&b.index))
    });

    let mut kept: Vec<AxisHit> = Vec::with_capacity(candidates.len());
    for hit in candidates {
        if kept.iter().all(|k| k.index.abs_diff(hit.index) > spacing) {
            kept.push(hit);
        }
    }
    kept.sort_by_key(|h| h.index);
    kept
}

impl Correlator {
    pub fn new(config: &ModemConfig) -> Self {
        let header = config.header.header(config.modulation);
        Self {
            header_re: header.iter().map(|s| s.re).collect(),
            header_im: header.iter().map(|s| s.im).collect(),
            trigger: config.trigger,
            max_hits: config.max_hits,
            spacing: config.frame_len() - header.len(),
            modulation: config.modulation,
        }
    }

    pub fn header_len(&self) -> usize {
        self.header_re.len()
    }

    fn axis_hits(&self, samples: &[f64], header: &[f64], axis: &'static str) -> Vec<AxisHit> {
        // a peak past the last symbol has no frame body behind it
        let candidates: Vec<AxisHit> = correlate_full(samples, header)
            .into_iter()
            .take(samples.len())
            .enumerate()
            .filter(|(_, v)| v.abs() >= self.trigger)
            .map(|(index, value)| AxisHit { index, value })
            .collect();

        let found = candidates.len();
        let mut hits = pick_peaks(candidates, self.spacing);
        if hits.len() < found {
            tracing::trace!(axis, found, kept = hits.len(), "masked payload peaks");
        }

        if hits.len() > self.max_hits {
            tracing::warn!(
                axis,
                found = hits.len(),
                kept = self.max_hits,
                "sync hit capacity exceeded, dropping later hits"
            );
            hits.truncate(self.max_hits);
        }
        hits
    }

    /// Locate headers in a quantized symbol stream
    ///
    /// # Errors
    /// `AxisDesync` when the two axes report different hit counts.
    pub fn correlate(&self, symbols: &[Complex64]) -> ModemResult<Vec<SyncEvent>> {
        let re: Vec<f64> = symbols.iter().map(|s| s.re).collect();
        let real = self.axis_hits(&re, &self.header_re, "real");

        // 4PAM carries nothing on the imaginary axis
        let imag = if self.modulation.is_real_only() {
            real.clone()
        } else {
            let im: Vec<f64> = symbols.iter().map(|s| s.im).collect();
            self.axis_hits(&im, &self.header_im, "imag")
        };

        if real.len() != imag.len() {
            return Err(ModemError::AxisDesync {
                real: real.len(),
                imag: imag.len(),
            });
        }

        tracing::debug!(hits = real.len(), "header correlation");

        Ok(real
            .into_iter()
            .zip(imag)
            .map(|(real, imag)| SyncEvent { real, imag })
            .collect())
    }
}
