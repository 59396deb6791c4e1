//! Carrier Recovery (Costas Loop)
//!
//! Fine phase tracking for the real passband signal. Four mixer
//! branches at 0°, 45°, 90° and 135° relative to the current phase
//! estimate are each lowpass filtered; the product of the four filtered
//! outputs is the phase error, so the loop is blind to the QAM
//! constellation's four-fold symmetry.
//!
//! ```text
//! z_b[k]   = 2·r[k]·cos(2π·f0·k/fs + θ[k] + b·π/4)
//! θ[k+1]   = θ[k] + μ·Π_b LPF(z_b)[k]
//! ```
//!
//! The loop runs once per sample with no convergence check. θ is left
//! unbounded internally and wrapped to [-π, π) when reported.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::config::CostasConfig;
use crate::error::ModemResult;
use crate::filters::{costas_lowpass, FirFilter};
use crate::utils::wrap_phase;

/// Mixer phase offsets of the four branches
const BRANCH_OFFSETS: [f64; 4] = [0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0];

/// Result of one pass over a buffer
#[derive(Debug, Clone)]
pub struct CostasOutput {
    /// Phase estimate used at each sample (unbounded)
    pub theta: Vec<f64>,
    /// Recovered real carrier cos(2π·f0·t + θ)
    pub carrier: Vec<f64>,
    /// De-rotation exp(-j(2π·f0·t + θ))
    pub derotation: Vec<Complex64>,
}

impl CostasOutput {
    /// Last phase estimate, wrapped to [-π, π)
    pub fn final_phase(&self) -> f64 {
        self.theta.last().copied().map(wrap_phase).unwrap_or(0.0)
    }

    /// Phase trajectory wrapped to [-π, π) for display
    pub fn wrapped_theta(&self) -> Vec<f64> {
        self.theta.iter().copied().map(wrap_phase).collect()
    }
}

/// Four-branch Costas loop
#[derive(Debug, Clone)]
pub struct CostasLoop {
    branches: [FirFilter; 4],
    mu: f64,
    theta_init: f64,
    theta: f64,
    carrier_freq: f64,
    sample_rate: f64,
    index: u64,
}

impl CostasLoop {
    /// Create a loop with the equiripple branch filter from `config`
    ///
    /// # Arguments
    /// * `config` - Step size, initial phase and filter length
    /// * `carrier_freq` - Carrier the branches mix against (Hz)
    /// * `sample_rate` - Sample rate (Hz)
    pub fn new(config: &CostasConfig, carrier_freq: f64, sample_rate: f64) -> ModemResult<Self> {
        let taps = costas_lowpass(config.num_taps)?;
        Ok(Self::with_taps(
            taps,
            config.mu,
            config.theta_init,
            carrier_freq,
            sample_rate,
        ))
    }

    /// Create a loop with caller-supplied branch filter taps
    pub fn with_taps(
        taps: Vec<f64>,
        mu: f64,
        theta_init: f64,
        carrier_freq: f64,
        sample_rate: f64,
    ) -> Self {
        let fir = FirFilter::new(taps);
        Self {
            branches: [fir.clone(), fir.clone(), fir.clone(), fir],
            mu,
            theta_init,
            theta: theta_init,
            carrier_freq,
            sample_rate,
            index: 0,
        }
    }

    /// Oscillator phase (without θ) at the current sample
    #[inline]
    fn carrier_phase(&self) -> f64 {
        2.0 * PI * self.carrier_freq * self.index as f64 / self.sample_rate
    }

    /// Consume one sample; returns the phase estimate that was applied to it
    pub fn step(&mut self, sample: f64) -> f64 {
        let phase = self.carrier_phase() + self.theta;
        let s = 2.0 * sample;

        let mut error = 1.0;
        for (branch, offset) in self.branches.iter_mut().zip(BRANCH_OFFSETS.iter()) {
            error *= branch.push(s * (phase + offset).cos());
        }

        let applied = self.theta;
        self.theta += self.mu * error;
        self.index += 1;
        applied
    }

    /// Run the loop over a whole real buffer
    pub fn process(&mut self, samples: &[f64]) -> CostasOutput {
        let mut theta = Vec::with_capacity(samples.len());
        let mut carrier = Vec::with_capacity(samples.len());
        let mut derotation = Vec::with_capacity(samples.len());

        for &s in samples {
            let osc = self.carrier_phase();
            let th = self.step(s);
            theta.push(th);
            carrier.push((osc + th).cos());
            derotation.push(Complex64::from_polar(1.0, -(osc + th)));
        }

        tracing::debug!(
            samples = samples.len(),
            final_phase = self.phase(),
            "costas loop pass complete"
        );

        CostasOutput {
            theta,
            carrier,
            derotation,
        }
    }

    /// Current phase estimate, wrapped to [-π, π)
    pub fn phase(&self) -> f64 {
        wrap_phase(self.theta)
    }

    /// Current phase estimate without wrapping
    pub fn unwrapped_phase(&self) -> f64 {
        self.theta
    }

    /// Restart from the initial phase with empty branch filters
    pub fn reset(&mut self) {
        self.theta = self.theta_init;
        self.index = 0;
        for branch in self.branches.iter_mut() {
            branch.reset();
        }
    }
}
