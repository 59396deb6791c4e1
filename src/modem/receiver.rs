//! Receive chain
//!
//! One captured buffer goes through:
//!
//! ```text
//! AGC → coarse offset (r⁴ FFT / 4) → shift by fc − offset
//!     → Costas on the real part → de-rotate → matched filter
//!     → timing recovery per axis → quantize → correlate
//!     → extract → reassemble
//! ```
//!
//! Nothing carries over between buffers; every call starts the loops
//! from their initial state.

use num_complex::Complex64;

use crate::carriers::{estimate_offset, mix, CostasLoop};
use crate::config::ModemConfig;
use crate::error::{ModemError, ModemResult};
use crate::framing::{extract_frames, Correlator, Reassembler, SyncEvent};
use crate::modem::{normalize_rms, quantize};
use crate::pulse_shapes::SquareRootRaisedCosine;
use crate::timing::TimingRecovery;
use crate::traits::PulseShape;

/// Everything one receive pass produced
#[derive(Debug, Clone)]
pub struct RxOutcome {
    /// Reassembled message, if any frame validated
    pub message: Option<String>,
    /// Coarse carrier offset removed before the Costas loop (Hz)
    pub coarse_offset: f64,
    /// Costas phase estimate at the end of the buffer, in [-π, π)
    pub final_phase: f64,
    /// Header positions found in the quantized stream
    pub events: Vec<SyncEvent>,
    /// Quantized symbols
    pub symbols: Vec<Complex64>,
    /// Quantizer decision radius
    pub threshold: f64,
    /// Decision circle for constellation plots
    pub threshold_ring: Vec<Complex64>,
    /// Raw extracted text (IDs and filler included)
    pub extracted: String,
}

/// Buffer-at-a-time receiver
pub struct Receiver {
    config: ModemConfig,
    pulse: SquareRootRaisedCosine,
    costas: CostasLoop,
    timing: TimingRecovery,
    correlator: Correlator,
    reassembler: Reassembler,
}

impl Receiver {
    pub fn new(config: ModemConfig) -> ModemResult<Self> {
        Self::with_verbose(config, false)
    }

    /// Receiver whose reassembler logs every fragment decision
    pub fn with_verbose(config: ModemConfig, verbose: bool) -> ModemResult<Self> {
        config.validate()?;
        let pulse = SquareRootRaisedCosine::new(
            config.samples_per_symbol,
            config.rolloff,
            config.half_symbols,
        );
        let costas = CostasLoop::new(&config.costas, config.carrier_freq, config.sample_rate)?;
        let timing = TimingRecovery::new(&config);
        let correlator = Correlator::new(&config);
        Ok(Self {
            config,
            pulse,
            costas,
            timing,
            correlator,
            reassembler: Reassembler::new(verbose),
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Smallest buffer the chain accepts
    pub fn min_samples(&self) -> usize {
        4 * self.config.half_width()
    }

    fn matched_filter(&self, samples: &[f64]) -> Vec<f64> {
        let gain = self.pulse.peak();
        self.pulse
            .filter_block(samples)
            .into_iter()
            .map(|v| v * gain)
            .collect()
    }

    /// Recover carrier and timing, then frames, from one captured buffer
    pub fn process(&mut self, samples: &[Complex64]) -> ModemResult<RxOutcome> {
        let needed = self.min_samples();
        if samples.len() < needed {
            return Err(ModemError::BufferTooShort {
                needed,
                got: samples.len(),
            });
        }
        let fs = self.config.sample_rate;
        let fc = self.config.carrier_freq;

        let normalized = normalize_rms(samples);
        let coarse_offset = estimate_offset(&normalized, fs);
        let shifted = mix(&normalized, fc - coarse_offset, fs);

        self.costas.reset();
        let real: Vec<f64> = shifted.iter().map(|s| s.re).collect();
        let carrier = self.costas.process(&real);
        let final_phase = carrier.final_phase();

        let baseband: Vec<Complex64> = shifted
            .iter()
            .zip(carrier.derotation.iter())
            .map(|(&s, &d)| s * d)
            .collect();

        let mf_re = self.matched_filter(&baseband.iter().map(|s| s.re).collect::<Vec<_>>());
        let mf_im = self.matched_filter(&baseband.iter().map(|s| s.im).collect::<Vec<_>>());

        let start = self.timing.default_start();
        let re = self.timing.run(&mf_re, start)?;
        let im = self.timing.run(&mf_im, start)?;
        let recovered: Vec<Complex64> = re
            .samples
            .iter()
            .zip(im.samples.iter())
            .map(|(&r, &i)| Complex64::new(r, i))
            .collect();

        let quantized = quantize(&recovered, self.config.modulation.rings());
        let events = self.correlator.correlate(&quantized.symbols)?;
        let extracted = extract_frames(&quantized.symbols, &events, &self.config);
        let message = self.reassembler.reassemble(&extracted);

        match &message {
            Some(text) => tracing::info!(
                chars = text.chars().count(),
                frames = events.len(),
                "message recovered"
            ),
            None => tracing::debug!(frames = events.len(), "no message in buffer"),
        }

        Ok(RxOutcome {
            message,
            coarse_offset,
            final_phase,
            events,
            symbols: quantized.symbols,
            threshold: quantized.threshold,
            threshold_ring: quantized.threshold_ring,
            extracted,
        })
    }

    /// Polling entry point: never fails, errors are logged and dropped
    pub fn receive(&mut self, samples: &[Complex64]) -> Option<String> {
        match self.process(samples) {
            Ok(outcome) => outcome.message,
            Err(err) => {
                tracing::warn!(%err, recoverable = err.is_recoverable(), "receive pass failed");
                None
            }
        }
    }

    /// Polling entry point for interleaved I/Q ADC words
    pub fn receive_raw(&mut self, iq: &[i16]) -> Option<String> {
        let scale = self.config.rx_scale;
        let samples: Vec<Complex64> = iq
            .chunks_exact(2)
            .map(|pair| Complex64::new(pair[0] as f64 / scale, pair[1] as f64 / scale))
            .collect();
        self.receive(&samples)
    }
}
