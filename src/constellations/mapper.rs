//! Text ↔ PAM ↔ symbol conversion
//!
//! Each character is written as four base-4 digits, most significant
//! first, so only code points 0..=255 are representable.

use num_complex::Complex64;

use super::{ModulationType, PamLevel};
use crate::error::{ModemError, ModemResult};

/// Digits per character
const DIGITS_PER_CHAR: usize = 4;

/// Placeholder for a character whose symbols fell outside the alphabet
pub const REPLACEMENT: char = '\u{FFFD}';

/// Expand text into PAM levels, four per character
pub fn letters_to_pam(text: &str) -> ModemResult<Vec<PamLevel>> {
    let mut out = Vec::with_capacity(text.len() * DIGITS_PER_CHAR);
    for ch in text.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return Err(ModemError::UnsupportedCharacter { ch, code });
        }
        for shift in [6u32, 4, 2, 0] {
            let digit = ((code >> shift) & 0x3) as u8;
            if let Some(level) = PamLevel::from_digit(digit) {
                out.push(level);
            }
        }
    }
    Ok(out)
}

fn char_from_levels(group: &[PamLevel]) -> char {
    let code = group
        .iter()
        .fold(0u8, |acc, level| (acc << 2) | level.digit());
    char::from(code)
}

/// Collapse PAM levels back into text; a trailing partial group is dropped
pub fn pam_to_letters(levels: &[PamLevel]) -> String {
    levels
        .chunks_exact(DIGITS_PER_CHAR)
        .map(char_from_levels)
        .collect()
}

/// Map text straight to constellation points
pub fn text_to_symbols(text: &str, modulation: ModulationType) -> ModemResult<Vec<Complex64>> {
    Ok(letters_to_pam(text)?
        .into_iter()
        .map(|level| modulation.pam_to_symbol(level))
        .collect())
}

/// Demap quantized symbols into text
///
/// A group of four containing any unrecognized point decodes to
/// U+FFFD instead of a guessed character.
pub fn symbols_to_text(symbols: &[Complex64], modulation: ModulationType) -> String {
    let mut text = String::with_capacity(symbols.len() / DIGITS_PER_CHAR);
    let mut levels = Vec::with_capacity(DIGITS_PER_CHAR);

    for group in symbols.chunks_exact(DIGITS_PER_CHAR) {
        levels.clear();
        let decoded: ModemResult<()> = group.iter().try_for_each(|&s| {
            levels.push(modulation.symbol_to_pam(s)?);
            Ok(())
        });
        match decoded {
            Ok(()) => text.push(char_from_levels(&levels)),
            Err(err) => {
                tracing::trace!(%err, "undecodable character");
                text.push(REPLACEMENT);
            }
        }
    }
    text
}
