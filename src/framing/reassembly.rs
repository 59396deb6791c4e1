//! Fragment reassembly
//!
//! Extracted text is split on the `0X` marker. A piece opens a frame
//! when it starts with two hex digits; the frame is accepted only when
//! the very next piece repeats the same two characters, which is the
//! suffix ID. Accepted bodies are kept per ID and the most recent copy
//! wins, so a repeated transmission overwrites an older decode.

use std::collections::BTreeMap;

use super::{is_filler, ID_MARKER};

/// Scanner state between pieces
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scan<'a> {
    /// No frame is open
    Idle,
    /// Saw `0X<tag><body>` and waiting for `0X<tag>` to close it
    Open { tag: &'a str, id: u8, body: &'a str },
}

/// Split a piece into its two-character ID tag and the rest
fn split_tag(piece: &str) -> Option<(&str, u8, &str)> {
    let tag = piece.get(..2)?;
    // from_str_radix alone would accept a leading '+'
    if !tag.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let id = u8::from_str_radix(tag, 16).ok()?;
    Some((tag, id, &piece[2..]))
}

/// Rebuilds messages from raw extracted text
#[derive(Debug, Clone, Default)]
pub struct Reassembler {
    verbose: bool,
}

impl Reassembler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Validated frame bodies keyed by ID
    pub fn fragments(&self, text: &str) -> BTreeMap<u8, String> {
        let mut frames = BTreeMap::new();
        let mut state = Scan::Idle;

        // text before the first marker never belongs to a frame
        for piece in text.split(ID_MARKER).skip(1) {
            let parsed = split_tag(piece);

            if let Scan::Open { tag, id, body } = state {
                match parsed {
                    Some((next_tag, _, _)) if next_tag == tag => {
                        if body.is_empty() || is_filler(body) {
                            if self.verbose {
                                tracing::debug!(id, body, "skipping filler fragment");
                            }
                        } else {
                            if self.verbose {
                                tracing::debug!(id, body, "accepted fragment");
                            }
                            frames.insert(id, body.to_string());
                        }
                    }
                    _ => {
                        if self.verbose {
                            tracing::debug!(id, body, "unterminated fragment dropped");
                        }
                    }
                }
            }

            state = match parsed {
                Some((tag, id, body)) => Scan::Open { tag, id, body },
                None => Scan::Idle,
            };
        }

        frames
    }

    /// Concatenate validated bodies in ascending ID order
    ///
    /// Returns `None` when no frame survives validation.
    pub fn reassemble(&self, text: &str) -> Option<String> {
        let frames = self.fragments(text);
        if frames.is_empty() {
            return None;
        }
        Some(frames.into_values().collect())
    }
}

/// One-shot reassembly of raw extracted text
pub fn reassemble(text: &str, verbose: bool) -> Option<String> {
    Reassembler::new(verbose).reassemble(text)
}
