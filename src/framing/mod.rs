//! Link-layer framing
//!
//! A frame is a Barker header followed by the symbols of
//! `ID + chunk + ID + filler`, where `ID` is `0X` plus two hex digits.
//! The receiver locates headers by correlation, slices the frames out,
//! and the reassembler keeps every body whose two ID markers agree.

mod barker;
mod builder;
mod correlator;
mod extractor;
mod reassembly;

pub use barker::{autocorrelation, BarkerCode};
pub use builder::{build_frames, frame_text, TxFrames};
pub use correlator::{AxisHit, Correlator, SyncEvent};
pub use extractor::{extract_fragment, extract_frames};
pub use reassembly::{reassemble, Reassembler};

/// Literal that opens every frame ID
pub const ID_MARKER: &str = "0X";

/// Characters in one rendered frame ID
pub const ID_CHARS: usize = 4;

/// Padding alphabet for short final chunks, used cyclically
pub const FILLER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ01234567890";

/// Render frame `index` as its ID marker (IDs wrap at 256)
pub fn frame_id(index: usize) -> String {
    format!("{}{:02X}", ID_MARKER, index % 256)
}

/// First `n` characters of the cyclic filler stream
pub fn filler(n: usize) -> String {
    FILLER.chars().cycle().take(n).collect()
}

/// True when `text` is a non-empty prefix of the cyclic filler stream
pub fn is_filler(text: &str) -> bool {
    !text.is_empty() && text.chars().zip(FILLER.chars().cycle()).all(|(a, b)| a == b)
}
