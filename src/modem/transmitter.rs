//! Transmit chain
//!
//! Text → frames → impulses every P samples → SRRC pulse shaping per
//! axis → cyclic tiling to the TX buffer length. The radio replays the
//! buffer continuously, so a receiver may start capturing anywhere.

use num_complex::Complex64;

use crate::config::ModemConfig;
use crate::error::{ModemError, ModemResult};
use crate::framing::{build_frames, TxFrames};
use crate::pulse_shapes::SquareRootRaisedCosine;
use crate::traits::PulseShape;
use crate::utils::interleave_i16;

/// Place one impulse per symbol at the start of each symbol period
pub fn upsample(symbols: &[Complex64], samples_per_symbol: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); symbols.len() * samples_per_symbol];
    for (i, &s) in symbols.iter().enumerate() {
        out[i * samples_per_symbol] = s;
    }
    out
}

/// Text-to-waveform modulator
pub struct Transmitter {
    config: ModemConfig,
    pulse: SquareRootRaisedCosine,
}

impl Transmitter {
    pub fn new(config: ModemConfig) -> ModemResult<Self> {
        config.validate()?;
        let pulse = SquareRootRaisedCosine::new(
            config.samples_per_symbol,
            config.rolloff,
            config.half_symbols,
        );
        Ok(Self { config, pulse })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Frame `text` into symbols
    pub fn frames(&self, text: &str) -> ModemResult<TxFrames> {
        build_frames(text, &self.config)
    }

    /// Pulse-shape a symbol stream (unscaled, one pass, no tiling)
    pub fn shape(&self, symbols: &[Complex64]) -> Vec<Complex64> {
        let up = upsample(symbols, self.config.samples_per_symbol);
        let re: Vec<f64> = up.iter().map(|s| s.re).collect();
        let im: Vec<f64> = up.iter().map(|s| s.im).collect();
        let re = self.pulse.filter_block(&re);
        let im = self.pulse.filter_block(&im);
        re.into_iter()
            .zip(im)
            .map(|(r, i)| Complex64::new(r, i))
            .collect()
    }

    /// Full TX buffer for `text`: shaped, tiled to `buffer_len` and scaled
    pub fn modulate(&self, text: &str) -> ModemResult<Vec<Complex64>> {
        let frames = self.frames(text)?;
        let wave = self.shape(&frames.symbols);
        if wave.is_empty() {
            return Err(ModemError::EmptyMessage);
        }

        let buffer_len = self.config.buffer_len;
        if wave.len() > buffer_len {
            tracing::warn!(
                waveform = wave.len(),
                buffer_len,
                "message longer than TX buffer, later frames are cut"
            );
        }

        let scale = self.config.tx_scale;
        let out: Vec<Complex64> = wave
            .iter()
            .cycle()
            .take(buffer_len)
            .map(|&s| s * scale)
            .collect();

        tracing::debug!(
            frames = frames.frame_count,
            symbols = frames.symbols.len(),
            samples = out.len(),
            "modulated TX buffer"
        );
        Ok(out)
    }

    /// TX buffer as interleaved I/Q 16-bit DAC words (saturating)
    pub fn modulate_dac(&self, text: &str) -> ModemResult<Vec<i16>> {
        Ok(interleave_i16(&self.modulate(text)?))
    }
}
