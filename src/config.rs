//! Modem configuration
//!
//! Every pipeline stage takes its constants from one `ModemConfig`
//! passed by reference. Nothing is read from globals.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constellations::ModulationType;
use crate::error::{ModemError, ModemResult};
use crate::framing::BarkerCode;

/// Default oversampling factor (samples per symbol)
pub const DEFAULT_SPS: usize = 16;

/// Default pulse half-width in symbols
pub const DEFAULT_HALF_SYMBOLS: usize = 6;

/// Default SRRC roll-off
pub const DEFAULT_ROLLOFF: f64 = 0.75;

/// Default payload characters per frame
pub const DEFAULT_CHUNK_LEN: usize = 80;

/// Default sample rate (Hz)
pub const DEFAULT_SAMPLE_RATE: f64 = 10e6;

/// Default carrier the receiver shifts to before the Costas loop (Hz)
pub const DEFAULT_CARRIER_FREQ: f64 = 2e6;

/// Costas loop parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostasConfig {
    /// Phase update step size
    pub mu: f64,
    /// Initial phase estimate (radians)
    pub theta_init: f64,
    /// Lowpass filter length (odd)
    pub num_taps: usize,
}

impl Default for CostasConfig {
    fn default() -> Self {
        Self {
            mu: 0.005,
            theta_init: PI / 6.0,
            num_taps: 201,
        }
    }
}

/// Timing recovery parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Timing update step size
    pub mu: f64,
    /// Early/late probe spacing in samples
    pub delta: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { mu: 0.4, delta: 2.0 }
    }
}

/// Complete modem configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// Oversampling factor P
    pub samples_per_symbol: usize,
    /// Pulse truncation half-width L (symbols)
    pub half_symbols: usize,
    /// SRRC roll-off β
    pub rolloff: f64,
    /// Synchronization header
    pub header: BarkerCode,
    /// Symbol alphabet
    pub modulation: ModulationType,
    /// Payload characters per frame D
    pub chunk_len: usize,
    /// Minimum |correlation| accepted as a sync hit
    pub trigger: f64,
    /// Sync hits kept per axis
    pub max_hits: usize,
    /// Sample rate (Hz)
    pub sample_rate: f64,
    /// Receiver carrier shift (Hz)
    pub carrier_freq: f64,
    pub costas: CostasConfig,
    pub timing: TimingConfig,
    /// TX amplitude scale (DAC full scale is 2^15)
    pub tx_scale: f64,
    /// RX raw sample divisor
    pub rx_scale: f64,
    /// TX cyclic buffer length in samples
    pub buffer_len: usize,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            samples_per_symbol: DEFAULT_SPS,
            half_symbols: DEFAULT_HALF_SYMBOLS,
            rolloff: DEFAULT_ROLLOFF,
            header: BarkerCode::Barker13,
            modulation: ModulationType::Qam4_2,
            chunk_len: DEFAULT_CHUNK_LEN,
            trigger: 80.0,
            max_hits: 80,
            sample_rate: DEFAULT_SAMPLE_RATE,
            carrier_freq: DEFAULT_CARRIER_FREQ,
            costas: CostasConfig::default(),
            timing: TimingConfig::default(),
            tx_scale: (1u32 << 14) as f64,
            rx_scale: (1u32 << 11) as f64,
            buffer_len: 1 << 14,
        }
    }
}

impl ModemConfig {
    /// Defaults with a correlation trigger matched to the alphabet
    pub fn for_modulation(modulation: ModulationType) -> Self {
        let trigger = match modulation {
            // 1.1-scaled header against unit symbols peaks at 14.3 for Barker-13
            ModulationType::Qam4 => 13.0,
            ModulationType::Qam4_2 | ModulationType::Pam4 => 80.0,
        };
        Self {
            modulation,
            trigger,
            ..Self::default()
        }
    }

    /// Pulse half-width in samples (L·P)
    pub fn half_width(&self) -> usize {
        self.half_symbols * self.samples_per_symbol
    }

    /// Symbols in one frame: header + 4·(chunk_len + 8)
    pub fn frame_len(&self) -> usize {
        self.header.len() + 4 * (self.chunk_len + 2 * crate::framing::ID_CHARS)
    }

    /// Check that every stage can run with these constants
    pub fn validate(&self) -> ModemResult<()> {
        if self.samples_per_symbol == 0 {
            return Err(ModemError::InvalidConfig("samples_per_symbol must be > 0".into()));
        }
        if self.half_symbols == 0 {
            return Err(ModemError::InvalidConfig("half_symbols must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.rolloff) {
            return Err(ModemError::InvalidConfig(format!(
                "rolloff {} outside [0, 1]",
                self.rolloff
            )));
        }
        if self.chunk_len == 0 {
            return Err(ModemError::InvalidConfig("chunk_len must be > 0".into()));
        }
        if self.trigger <= 0.0 {
            return Err(ModemError::InvalidConfig(format!(
                "trigger {} must be positive",
                self.trigger
            )));
        }
        if self.max_hits == 0 {
            return Err(ModemError::InvalidConfig("max_hits must be > 0".into()));
        }
        if self.costas.num_taps % 2 == 0 {
            return Err(ModemError::InvalidConfig(format!(
                "Costas filter needs an odd tap count, got {}",
                self.costas.num_taps
            )));
        }
        if self.sample_rate <= 2.0 * self.carrier_freq {
            return Err(ModemError::InvalidConfig(format!(
                "sample rate {} Hz cannot carry {} Hz",
                self.sample_rate, self.carrier_freq
            )));
        }
        if self.timing.delta <= 0.0 {
            return Err(ModemError::InvalidConfig("timing delta must be positive".into()));
        }
        Ok(())
    }
}
