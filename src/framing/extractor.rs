//! RX frame extractor
//!
//! Slices the symbols between consecutive sync events, undoes any axis
//! inversion reported by the correlator, and demaps the result. The
//! output is raw text that still carries IDs and filler.

use num_complex::Complex64;

use super::SyncEvent;
use crate::config::ModemConfig;
use crate::constellations::{symbols_to_text, ModulationType};
use crate::utils::sign;

/// Clamped `[start, end)` slice following one axis hit
fn axis_slice(
    values: &[f64],
    hit: usize,
    next_hit: Option<usize>,
    header_len: usize,
    frame_len: usize,
) -> &[f64] {
    let start = (hit + 1).min(values.len());
    let end = match next_hit {
        Some(next) => (next + 1).saturating_sub(header_len),
        None => start + frame_len.saturating_sub(header_len),
    };
    let end = end.clamp(start, values.len());
    &values[start..end]
}

/// Decode the frame that follows `event`
///
/// `next` is the following sync event, if any; without one the slice is
/// one frame long.
pub fn extract_fragment(
    symbols: &[Complex64],
    event: &SyncEvent,
    next: Option<&SyncEvent>,
    header_len: usize,
    frame_len: usize,
    modulation: ModulationType,
) -> String {
    let re: Vec<f64> = symbols.iter().map(|s| s.re).collect();
    let re = axis_slice(
        &re,
        event.real.index,
        next.map(|n| n.real.index),
        header_len,
        frame_len,
    );
    let sr = sign(event.real.value);

    let frame: Vec<Complex64> = if modulation.is_real_only() {
        re.iter().map(|&r| Complex64::new(r * sr, 0.0)).collect()
    } else {
        let im: Vec<f64> = symbols.iter().map(|s| s.im).collect();
        let im = axis_slice(
            &im,
            event.imag.index,
            next.map(|n| n.imag.index),
            header_len,
            frame_len,
        );
        let si = sign(event.imag.value);
        if re.len() != im.len() {
            tracing::trace!(real = re.len(), imag = im.len(), "axis slice lengths differ");
        }
        re.iter()
            .zip(im.iter())
            .map(|(&r, &i)| Complex64::new(r * sr, i * si))
            .collect()
    };

    symbols_to_text(&frame, modulation)
}

/// Decode every frame in a quantized stream and concatenate the raw text
pub fn extract_frames(symbols: &[Complex64], events: &[SyncEvent], config: &ModemConfig) -> String {
    let header_len = config.header.len();
    let frame_len = config.frame_len();

    let mut text = String::new();
    for (i, event) in events.iter().enumerate() {
        text.push_str(&extract_fragment(
            symbols,
            event,
            events.get(i + 1),
            header_len,
            frame_len,
            config.modulation,
        ));
    }
    text
}
