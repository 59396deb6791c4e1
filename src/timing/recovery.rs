//! Timing recovery by output-power maximization
//!
//! Each iteration samples the matched-filter output at the current
//! estimate and at early/late probes `±delta` samples away, then nudges
//! the fractional offset toward the power peak:
//!
//! ```text
//! tau += mu · (x(t + delta) - x(t - delta)) · x(t)
//! ```
//!
//! `t_now` advances exactly one symbol per iteration.

use crate::config::ModemConfig;
use crate::error::ModemResult;
use crate::pulse_shapes::interpolate;

/// Recovered timing offsets and symbol-rate samples for one axis
#[derive(Debug, Clone, Default)]
pub struct TimingOutput {
    /// Fractional offset after each iteration
    pub tau: Vec<f64>,
    /// Interpolated sample at each symbol instant
    pub samples: Vec<f64>,
}

/// Power-maximizing timing loop
#[derive(Debug, Clone, Copy)]
pub struct TimingRecovery {
    half_symbols: usize,
    samples_per_symbol: usize,
    rolloff: f64,
    mu: f64,
    delta: f64,
}

impl TimingRecovery {
    pub fn new(config: &ModemConfig) -> Self {
        Self::with_params(
            config.half_symbols,
            config.samples_per_symbol,
            config.rolloff,
            config.timing.mu,
            config.timing.delta,
        )
    }

    /// # Arguments
    /// * `half_symbols` - Pulse half-width L
    /// * `samples_per_symbol` - Oversampling factor P
    /// * `rolloff` - Interpolator roll-off β
    /// * `mu` - Step size
    /// * `delta` - Early/late probe spacing (samples)
    pub fn with_params(
        half_symbols: usize,
        samples_per_symbol: usize,
        rolloff: f64,
        mu: f64,
        delta: f64,
    ) -> Self {
        Self {
            half_symbols,
            samples_per_symbol,
            rolloff,
            mu,
            delta,
        }
    }

    /// Conventional starting point: two pulse half-widths in
    pub fn default_start(&self) -> f64 {
        (2 * self.half_symbols * self.samples_per_symbol) as f64
    }

    /// Raise `t_now` to the first index whose probes fit the interpolator window
    pub fn clamp_start(&self, t_now: f64) -> f64 {
        let l = (self.half_symbols * self.samples_per_symbol) as f64;
        let floor = (l / 2.0).max(l + self.delta.ceil() + 1.0);
        t_now.max(floor)
    }

    fn fits(&self, t: f64, len: usize) -> bool {
        let l = (self.half_symbols * self.samples_per_symbol) as f64;
        t - self.delta >= l && (t + self.delta).floor() + l + 1.0 <= len as f64
    }

    fn sample(&self, signal: &[f64], t: f64) -> ModemResult<f64> {
        interpolate(signal, t, self.half_symbols, self.samples_per_symbol, self.rolloff)
    }

    /// Run the loop over one axis of the matched-filter output
    pub fn run(&self, signal: &[f64], t_now: f64) -> ModemResult<TimingOutput> {
        let p = self.samples_per_symbol as f64;
        let end = signal.len() as f64 - p * self.half_symbols as f64 / 4.0;
        let mut t_now = self.clamp_start(t_now);
        let mut tau = 0.0;
        let mut out = TimingOutput::default();

        while t_now < end {
            let t = t_now + tau;
            if !self.fits(t, signal.len()) {
                break;
            }

            let current = self.sample(signal, t)?;
            let late = self.sample(signal, t + self.delta)?;
            let early = self.sample(signal, t - self.delta)?;
            tau += self.mu * (late - early) * current;

            t_now += p;
            out.tau.push(tau);
            out.samples.push(current);
        }

        tracing::debug!(
            symbols = out.samples.len(),
            final_tau = out.tau.last().copied().unwrap_or(0.0),
            "timing recovery pass complete"
        );
        Ok(out)
    }
}
