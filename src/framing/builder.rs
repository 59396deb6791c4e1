//! TX frame builder
//!
//! The message is cut into chunks of `chunk_len` characters. Each chunk
//! becomes `ID + chunk + ID` followed by filler up to the fixed frame
//! size, and its symbols are appended after a copy of the header.

use num_complex::Complex64;

use super::{filler, frame_id, is_filler, ID_CHARS, ID_MARKER};
use crate::config::ModemConfig;
use crate::constellations::text_to_symbols;
use crate::error::{ModemError, ModemResult};

/// Symbols per character
const SYMBOLS_PER_CHAR: usize = 4;

/// Output of the frame builder
#[derive(Debug, Clone, PartialEq)]
pub struct TxFrames {
    /// All frames back to back, headers included
    pub symbols: Vec<Complex64>,
    /// Symbols in one frame: header + 4·(chunk_len + 8)
    pub frame_len: usize,
    /// Header symbols prepended to every frame
    pub header: Vec<Complex64>,
    /// Characters in one frame body: chunk_len + 8
    pub frame_chars: usize,
    /// Number of frames
    pub frame_count: usize,
}

/// Body text of frame `index` carrying `chunk`, padded to `chunk_len`
pub fn frame_text(index: usize, chunk: &str, chunk_len: usize) -> String {
    let id = frame_id(index);
    let pad = chunk_len.saturating_sub(chunk.chars().count());

    let mut text = String::with_capacity(chunk_len + 2 * ID_CHARS);
    text.push_str(&id);
    text.push_str(chunk);
    text.push_str(&id);
    text.push_str(&filler(pad));
    text
}

/// Reject a chunk the reassembler could not read back
///
/// The receiver splits on `0X`, so the framed text may hold exactly the
/// two markers of its IDs. A chunk that looks like padding would be
/// discarded as filler.
fn check_chunk(index: usize, chunk: &str) -> ModemResult<()> {
    let id = frame_id(index);
    let tagged = format!("{id}{chunk}{id}");
    if tagged.matches(ID_MARKER).count() != 2 {
        return Err(ModemError::StrayIdMarker { frame: index });
    }
    if is_filler(chunk) {
        return Err(ModemError::FillerChunk {
            frame: index,
            chunk: chunk.to_string(),
        });
    }
    Ok(())
}

/// Build the TX symbol stream for `text`
///
/// # Arguments
/// * `text` - Message; every character must have a code point ≤ 255
/// * `config` - Supplies header, modulation and chunk length
///
/// # Errors
/// `StrayIdMarker` when a frame would carry `0X` inside its chunk, and
/// `FillerChunk` when a chunk is a prefix of the filler stream.
pub fn build_frames(text: &str, config: &ModemConfig) -> ModemResult<TxFrames> {
    if text.is_empty() {
        return Err(ModemError::EmptyMessage);
    }
    if config.chunk_len == 0 {
        return Err(ModemError::InvalidConfig("chunk_len must be > 0".into()));
    }

    let header = config.header.header(config.modulation);
    let frame_chars = config.chunk_len + 2 * ID_CHARS;
    let frame_len = header.len() + SYMBOLS_PER_CHAR * frame_chars;

    let chars: Vec<char> = text.chars().collect();
    let frame_count = chars.len().div_ceil(config.chunk_len);
    let mut symbols = Vec::with_capacity(frame_count * frame_len);

    for (index, chunk) in chars.chunks(config.chunk_len).enumerate() {
        let chunk: String = chunk.iter().collect();
        check_chunk(index, &chunk)?;
        let body = frame_text(index, &chunk, config.chunk_len);
        symbols.extend_from_slice(&header);
        symbols.extend(text_to_symbols(&body, config.modulation)?);
    }

    tracing::debug!(
        frames = frame_count,
        frame_len,
        modulation = %config.modulation,
        "built TX frames"
    );

    Ok(TxFrames {
        symbols,
        frame_len,
        header,
        frame_chars,
        frame_count,
    })
}
