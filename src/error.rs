//! Modem error types

use thiserror::Error;

/// Result type for modem operations
pub type ModemResult<T> = Result<T, ModemError>;

/// Errors that can occur while building or recovering frames
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModemError {
    /// Interpolation window falls outside the sample buffer
    #[error("Interpolation window of ±{window} around index {index} exceeds buffer of {len} samples")]
    InsufficientMargin { index: i64, len: usize, window: usize },

    /// Real and imaginary correlators disagree on the number of sync hits
    #[error("Axis desynchronization: {real} real hits vs {imag} imaginary hits")]
    AxisDesync { real: usize, imag: usize },

    /// Demapper received a point outside the modulation alphabet
    #[error("Unrecognized symbol {re:+.3}{im:+.3}j")]
    UnrecognizedSymbol { re: f64, im: f64 },

    /// Character does not fit in four base-4 digits
    #[error("Unsupported character {ch:?} (code point {code} > 255)")]
    UnsupportedCharacter { ch: char, code: u32 },

    /// Nothing to transmit
    #[error("Empty message")]
    EmptyMessage,

    /// Frame text would contain an ID marker outside its two ID fields
    #[error("Frame {frame} contains a stray \"0X\" ID marker")]
    StrayIdMarker { frame: usize },

    /// Chunk would be read back as padding and dropped
    #[error("Chunk {frame} {chunk:?} is indistinguishable from filler")]
    FillerChunk { frame: usize, chunk: String },

    /// Sample buffer too short for the requested stage
    #[error("Buffer too short: need {needed} samples, got {got}")]
    BufferTooShort { needed: usize, got: usize },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModemError {
    /// Stage-local anomalies that the receive path skips instead of surfacing
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ModemError::UnrecognizedSymbol { .. }
                | ModemError::AxisDesync { .. }
                | ModemError::InsufficientMargin { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModemError::AxisDesync { real: 3, imag: 2 };
        assert_eq!(
            err.to_string(),
            "Axis desynchronization: 3 real hits vs 2 imaginary hits"
        );

        let err = ModemError::UnsupportedCharacter { ch: 'λ', code: 955 };
        assert!(err.to_string().contains("955"), "{}", err);
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(ModemError::AxisDesync { real: 1, imag: 0 }.is_recoverable());
        assert!(ModemError::UnrecognizedSymbol { re: 2.0, im: 0.0 }.is_recoverable());
        assert!(!ModemError::EmptyMessage.is_recoverable());
        assert!(!ModemError::StrayIdMarker { frame: 0 }.is_recoverable());
        assert!(!ModemError::InvalidConfig("x".into()).is_recoverable());
    }
}
