//! Linear convolution and correlation with the usual "same" and "full" alignments

/// Convolution trimmed to `max(x.len(), h.len())` samples, centered on the full result
pub fn convolve_same(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() || h.is_empty() {
        return Vec::new();
    }
    let n = x.len();
    let m = h.len();
    let out_len = n.max(m);
    let start = (n.min(m) - 1) / 2;
    let mut out = vec![0.0; out_len];

    for (k, y) in out.iter_mut().enumerate() {
        // full-convolution index
        let full = k + start;
        let j_lo = full.saturating_sub(n - 1);
        let j_hi = full.min(m - 1);
        let mut acc = 0.0;
        for j in j_lo..=j_hi {
            acc += h[j] * x[full - j];
        }
        *y = acc;
    }
    out
}

/// Full cross-correlation; output index `k` is lag `k - (v.len() - 1)`
pub fn correlate_full(a: &[f64], v: &[f64]) -> Vec<f64> {
    if a.is_empty() || v.is_empty() {
        return Vec::new();
    }
    let n = a.len();
    let m = v.len();
    let mut out = Vec::with_capacity(n + m - 1);

    for k in 0..n + m - 1 {
        let mut acc = 0.0;
        for (j, &vj) in v.iter().enumerate() {
            // a index = j + k - (m - 1)
            let idx = j + k;
            if idx < m - 1 {
                continue;
            }
            let i = idx - (m - 1);
            if i >= n {
                break;
            }
            acc += a[i] * vj;
        }
        out.push(acc);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convolve_same_alignment() {
        // np.convolve([1,2,3,4,5], [1,0,-1], 'same') == [2, 2, 2, 2, -4]
        let y = convolve_same(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 0.0, -1.0]);
        assert_eq!(y, vec![2.0, 2.0, 2.0, 2.0, -4.0]);
    }

    #[test]
    fn test_convolve_same_impulse_centers_kernel() {
        let mut x = vec![0.0; 11];
        x[5] = 1.0;
        let h = [0.1, 0.5, 1.0, 0.5, 0.1];
        let y = convolve_same(&x, &h);
        assert_eq!(y.len(), 11);
        assert_eq!(&y[3..8], &h);
    }

    #[test]
    fn test_correlate_full_lags() {
        // np.correlate([1,2,3], [0,1,0.5], 'full') == [0.5, 2, 3.5, 3, 0]
        let c = correlate_full(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5]);
        assert_eq!(c, vec![0.5, 2.0, 3.5, 3.0, 0.0]);
    }

    #[test]
    fn test_correlate_peak_at_end_of_pattern() {
        let pattern = [1.0, 1.0, -1.0];
        let mut a = vec![0.0; 10];
        a[4..7].copy_from_slice(&pattern);
        let c = correlate_full(&a, &pattern);
        let (peak, _) = c
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) });
        // lag 4 lands on index 4 + 2, the last pattern sample
        assert_eq!(peak, 6, "correlation {:?}", c);
        assert_eq!(c[6], 3.0);
    }
}
