//! Parks-McClellan Equiripple FIR Filter Design
//!
//! Remez exchange over a dense frequency grid, producing a linear-phase
//! (odd length, symmetric) lowpass with equiripple pass- and stopbands.
//!
//! ```rust,ignore
//! use qam_modem::filters::RemezSpec;
//!
//! let taps = RemezSpec::lowpass(0.15, 0.2).with_num_taps(201).design()?;
//! ```

use std::f64::consts::PI;

use lazy_static::lazy_static;

use super::{COSTAS_PASSBAND_EDGE, COSTAS_STOPBAND_EDGE};
use crate::error::{ModemError, ModemResult};

/// Dense grid points per extremal
const GRID_DENSITY: usize = 16;

const MAX_ITERATIONS: usize = 25;

/// Relative spread of extremal errors at which the exchange stops
const CONVERGENCE: f64 = 1e-4;

/// Tap count of the Costas branch filters
pub const DEFAULT_COSTAS_TAPS: usize = 201;

lazy_static! {
    static ref COSTAS_TAPS: Option<Vec<f64>> = RemezSpec::lowpass(COSTAS_PASSBAND_EDGE, COSTAS_STOPBAND_EDGE)
        .with_num_taps(DEFAULT_COSTAS_TAPS)
        .design()
        .ok();
}

/// Lowpass taps for the Costas branches; the default length is designed once
pub fn costas_lowpass(num_taps: usize) -> ModemResult<Vec<f64>> {
    if num_taps == DEFAULT_COSTAS_TAPS {
        if let Some(taps) = COSTAS_TAPS.as_ref() {
            return Ok(taps.clone());
        }
    }
    RemezSpec::lowpass(COSTAS_PASSBAND_EDGE, COSTAS_STOPBAND_EDGE)
        .with_num_taps(num_taps)
        .design()
}

/// Specification for Parks-McClellan filter design.
#[derive(Debug, Clone)]
pub struct RemezSpec {
    /// Number of filter taps (odd)
    num_taps: usize,
    /// Band edges (fraction of the sample rate, 0 to 0.5)
    bands: Vec<(f64, f64)>,
    /// Desired response in each band
    desired: Vec<f64>,
    /// Weight of each band
    weights: Vec<f64>,
}

impl RemezSpec {
    /// Create a lowpass filter specification.
    ///
    /// # Arguments
    /// * `passband_edge` - End of passband (normalized, 0 to 0.5)
    /// * `stopband_edge` - Start of stopband (normalized, 0 to 0.5)
    pub fn lowpass(passband_edge: f64, stopband_edge: f64) -> Self {
        Self {
            num_taps: 31,
            bands: vec![(0.0, passband_edge), (stopband_edge, 0.5)],
            desired: vec![1.0, 0.0],
            weights: vec![1.0, 1.0],
        }
    }

    /// Set number of taps.
    pub fn with_num_taps(mut self, num_taps: usize) -> Self {
        self.num_taps = num_taps;
        self
    }

    /// Set passband and stopband weights.
    pub fn with_weights(mut self, passband_weight: f64, stopband_weight: f64) -> Self {
        self.weights = vec![passband_weight, stopband_weight];
        self
    }

    /// Run the exchange and return the filter taps.
    pub fn design(&self) -> ModemResult<Vec<f64>> {
        self.check()?;

        let grid = DenseGrid::new(&self.bands, &self.desired, &self.weights, self.num_taps);
        let r = grid.extremal_count();
        let n = grid.len();
        let mut ext: Vec<usize> = (0..=r).map(|i| i * (n - 1) / r).collect();

        for iteration in 0..MAX_ITERATIONS {
            let fit = Interpolant::fit(&grid, &ext, r);
            let error: Vec<f64> = (0..n)
                .map(|i| grid.weight[i] * (grid.desired[i] - fit.eval(grid.freq[i])))
                .collect();

            ext = find_extremals(&error, r + 1).ok_or_else(|| {
                ModemError::InvalidConfig(format!(
                    "Remez exchange lost alternation at iteration {}",
                    iteration
                ))
            })?;

            let (lo, hi) = ext.iter().fold((f64::MAX, 0.0_f64), |(lo, hi), &e| {
                (lo.min(error[e].abs()), hi.max(error[e].abs()))
            });
            if hi > 0.0 && (hi - lo) / hi < CONVERGENCE {
                tracing::trace!(iteration, ripple = hi, "remez converged");
                break;
            }
        }

        let fit = Interpolant::fit(&grid, &ext, r);
        Ok(frequency_sample(&fit, self.num_taps))
    }

    fn check(&self) -> ModemResult<()> {
        if self.num_taps < 3 || self.num_taps % 2 == 0 {
            return Err(ModemError::InvalidConfig(format!(
                "Remez lowpass needs an odd tap count >= 3, got {}",
                self.num_taps
            )));
        }
        let (_, pass) = self.bands[0];
        let (stop, _) = self.bands[1];
        if !(pass > 0.0 && pass < stop && stop < 0.5) {
            return Err(ModemError::InvalidConfig(format!(
                "band edges must satisfy 0 < {} < {} < 0.5",
                pass, stop
            )));
        }
        if self.weights.iter().any(|&w| w <= 0.0) {
            return Err(ModemError::InvalidConfig("band weights must be positive".into()));
        }
        Ok(())
    }
}

/// Frequency grid with desired response and weight per point
struct DenseGrid {
    freq: Vec<f64>,
    desired: Vec<f64>,
    weight: Vec<f64>,
    r: usize,
}

impl DenseGrid {
    fn new(bands: &[(f64, f64)], desired: &[f64], weights: &[f64], num_taps: usize) -> Self {
        let r = num_taps / 2 + 1;
        let delf = 0.5 / (GRID_DENSITY * r) as f64;

        let mut freq = Vec::new();
        let mut des = Vec::new();
        let mut weight = Vec::new();

        for (b, &(low, high)) in bands.iter().enumerate() {
            let k = ((high - low) / delf + 0.5) as usize;
            let mut f = low;
            for _ in 0..k {
                freq.push(f);
                des.push(desired[b]);
                weight.push(weights[b]);
                f += delf;
            }
            // last point lands exactly on the band edge
            if let Some(last) = freq.last_mut() {
                *last = high;
            }
        }

        Self {
            freq,
            desired: des,
            weight,
            r,
        }
    }

    fn len(&self) -> usize {
        self.freq.len()
    }

    fn extremal_count(&self) -> usize {
        self.r
    }
}

/// Barycentric Lagrange interpolant through the current extremals
struct Interpolant {
    ad: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Interpolant {
    fn fit(grid: &DenseGrid, ext: &[usize], r: usize) -> Self {
        let x: Vec<f64> = ext.iter().map(|&e| (2.0 * PI * grid.freq[e]).cos()).collect();
        // interleaved product keeps the denominators in range
        let ld = (r - 1) / 15 + 1;

        let ad: Vec<f64> = (0..=r)
            .map(|i| {
                let mut den = 1.0;
                for j in 0..ld {
                    for k in (j..=r).step_by(ld) {
                        if k != i {
                            den *= 2.0 * (x[i] - x[k]);
                        }
                    }
                }
                if den.abs() < 1e-5 {
                    den = 1e-5;
                }
                1.0 / den
            })
            .collect();

        let mut num = 0.0;
        let mut den = 0.0;
        let mut sign = 1.0;
        for i in 0..=r {
            num += ad[i] * grid.desired[ext[i]];
            den += sign * ad[i] / grid.weight[ext[i]];
            sign = -sign;
        }
        let delta = num / den;

        let mut sign = 1.0;
        let y = (0..=r)
            .map(|i| {
                let v = grid.desired[ext[i]] - sign * delta / grid.weight[ext[i]];
                sign = -sign;
                v
            })
            .collect();

        Self { ad, x, y }
    }

    fn eval(&self, f: f64) -> f64 {
        let xc = (2.0 * PI * f).cos();
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..self.x.len() {
            let c = xc - self.x[i];
            if c.abs() < 1e-7 {
                return self.y[i];
            }
            let c = self.ad[i] / c;
            den += c;
            num += c * self.y[i];
        }
        num / den
    }
}

/// Locate alternating error extrema, trimming surplus ones down to `wanted`
fn find_extremals(error: &[f64], wanted: usize) -> Option<Vec<usize>> {
    let n = error.len();
    if n < 2 {
        return None;
    }
    let mut found = Vec::with_capacity(2 * wanted);

    if (error[0] > 0.0 && error[0] > error[1]) || (error[0] < 0.0 && error[0] < error[1]) {
        found.push(0);
    }
    for i in 1..n - 1 {
        let e = error[i];
        if (e >= error[i - 1] && e > error[i + 1] && e > 0.0)
            || (e <= error[i - 1] && e < error[i + 1] && e < 0.0)
        {
            found.push(i);
        }
    }
    let last = n - 1;
    if (error[last] > 0.0 && error[last] > error[last - 1])
        || (error[last] < 0.0 && error[last] < error[last - 1])
    {
        found.push(last);
    }

    if found.len() < wanted {
        return None;
    }

    let mut extra = found.len() - wanted;
    while extra > 0 {
        let k = found.len();
        let mut up = error[found[0]] > 0.0;
        let mut smallest = 0;
        let mut alternating = true;
        for j in 1..k {
            if error[found[j]].abs() < error[found[smallest]].abs() {
                smallest = j;
            }
            if up && error[found[j]] < 0.0 {
                up = false;
            } else if !up && error[found[j]] > 0.0 {
                up = true;
            } else {
                alternating = false;
                break;
            }
        }
        if alternating && extra == 1 {
            smallest = if error[found[k - 1]].abs() < error[found[0]].abs() {
                k - 1
            } else {
                0
            };
        }
        found.remove(smallest);
        extra -= 1;
    }

    found.truncate(wanted);
    Some(found)
}

/// Turn the amplitude response into symmetric taps by frequency sampling
fn frequency_sample(fit: &Interpolant, num_taps: usize) -> Vec<f64> {
    let half = num_taps / 2;
    let amp: Vec<f64> = (0..=half)
        .map(|i| fit.eval(i as f64 / num_taps as f64))
        .collect();
    let m = half as f64;
    let n = num_taps as f64;

    (0..num_taps)
        .map(|t| {
            let x = 2.0 * PI * (t as f64 - m) / n;
            let mut val = amp[0];
            for (k, a) in amp.iter().enumerate().skip(1) {
                val += 2.0 * a * (x * k as f64).cos();
            }
            val / n
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::magnitude_response;

    #[test]
    fn test_remez_lowpass_design() {
        let taps = RemezSpec::lowpass(0.2, 0.3).with_num_taps(31).design().unwrap();
        assert_eq!(taps.len(), 31);

        let dc: f64 = taps.iter().sum();
        assert!((dc - 1.0).abs() < 0.01, "DC gain: {}", dc);
        let stop = magnitude_response(&taps, 0.4);
        assert!(stop < 0.01, "Stopband response at 0.4: {}", stop);
    }

    #[test]
    fn test_remez_symmetric_taps() {
        let taps = RemezSpec::lowpass(0.1, 0.2).with_num_taps(61).design().unwrap();
        for i in 0..taps.len() / 2 {
            assert!(
                (taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-12,
                "asymmetric at {}: {} vs {}",
                i,
                taps[i],
                taps[taps.len() - 1 - i]
            );
        }
    }

    #[test]
    fn test_costas_lowpass_response() {
        let taps = costas_lowpass(DEFAULT_COSTAS_TAPS).unwrap();
        assert_eq!(taps.len(), 201);

        let dc: f64 = taps.iter().sum();
        assert!((dc - 1.0).abs() < 1e-6, "DC gain: {}", dc);
        assert!((taps[100] - 0.35).abs() < 1e-3, "center tap {}", taps[100]);

        for &f in &[0.0, 0.05, 0.1, 0.15] {
            let h = magnitude_response(&taps, f);
            assert!((h - 1.0).abs() < 1e-5, "passband |H({})| = {}", f, h);
        }
        for &f in &[0.2, 0.25, 0.35, 0.45] {
            let h = magnitude_response(&taps, f);
            assert!(h < 1e-5, "stopband |H({})| = {}", f, h);
        }
    }

    #[test]
    fn test_cached_taps_match_fresh_design() {
        let cached = costas_lowpass(DEFAULT_COSTAS_TAPS).unwrap();
        let fresh = RemezSpec::lowpass(COSTAS_PASSBAND_EDGE, COSTAS_STOPBAND_EDGE)
            .with_num_taps(DEFAULT_COSTAS_TAPS)
            .design()
            .unwrap();
        assert_eq!(cached, fresh);
    }

    #[test]
    fn test_rejects_bad_specs() {
        assert!(RemezSpec::lowpass(0.2, 0.3).with_num_taps(30).design().is_err());
        assert!(RemezSpec::lowpass(0.3, 0.2).with_num_taps(31).design().is_err());
        assert!(RemezSpec::lowpass(0.2, 0.3)
            .with_weights(1.0, 0.0)
            .with_num_taps(31)
            .design()
            .is_err());
    }

    #[test]
    fn test_weighted_design_trades_ripple() {
        let flat = RemezSpec::lowpass(0.2, 0.3).with_num_taps(31).design().unwrap();
        let heavy = RemezSpec::lowpass(0.2, 0.3)
            .with_num_taps(31)
            .with_weights(1.0, 10.0)
            .design()
            .unwrap();
        let s_flat = magnitude_response(&flat, 0.35);
        let s_heavy = magnitude_response(&heavy, 0.35);
        assert!(s_heavy < s_flat, "weighted stopband {} vs {}", s_heavy, s_flat);
    }
}
