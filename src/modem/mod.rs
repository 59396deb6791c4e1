//! Transmit and receive chains
//!
//! `Transmitter` turns text into a cyclic complex baseband buffer.
//! `Receiver` recovers carrier, timing and frames from one captured
//! buffer and hands back whatever message it could rebuild.

mod agc;
mod quantizer;
mod receiver;
mod transmitter;

pub use agc::normalize_rms;
pub use quantizer::{quantize, threshold_ring, Quantized, THRESHOLD_RING_POINTS};
pub use receiver::{Receiver, RxOutcome};
pub use transmitter::{upsample, Transmitter};

#[cfg(test)]
mod pipeline_tests;
