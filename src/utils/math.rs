//! Small DSP math helpers

use num_complex::Complex64;
use std::f64::consts::PI;

/// Convert dB to a power ratio
#[inline]
pub fn db_to_power(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Wrap an angle to [-π, π)
#[inline]
pub fn wrap_phase(angle: f64) -> f64 {
    let a = (angle + PI).rem_euclid(2.0 * PI);
    a - PI
}

/// Sign with zero mapping to zero
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Root-mean-square magnitude of a complex buffer
pub fn rms(samples: &[Complex64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let power: f64 = samples.iter().map(|s| s.norm_sqr()).sum();
    (power / samples.len() as f64).sqrt()
}

/// Lexicographic (real, then imaginary) extremes of a complex buffer
pub fn lex_extremes(samples: &[Complex64]) -> Option<(Complex64, Complex64)> {
    let cmp = |a: &&Complex64, b: &&Complex64| {
        a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im))
    };
    let lo = samples.iter().min_by(cmp)?;
    let hi = samples.iter().max_by(cmp)?;
    Some((*lo, *hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversion() {
        assert!((db_to_power(0.0) - 1.0).abs() < 1e-10);
        assert!((db_to_power(20.0) - 100.0).abs() < 1e-9);
        assert!((db_to_power(-10.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_wrap_phase() {
        assert!((wrap_phase(0.0)).abs() < 1e-12);
        assert!((wrap_phase(1.5 * PI) + 0.5 * PI).abs() < 1e-9);
        assert!((wrap_phase(-PI) + PI).abs() < 1e-12);
        assert!((wrap_phase(PI) + PI).abs() < 1e-12, "π wraps to -π");
        for k in -20..20 {
            let w = wrap_phase(0.3 + 2.0 * PI * k as f64);
            assert!((w - 0.3).abs() < 1e-9, "k={} wrapped to {}", k, w);
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(2.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
    }

    #[test]
    fn test_rms() {
        let x = vec![Complex64::new(3.0, 4.0); 10];
        assert!((rms(&x) - 5.0).abs() < 1e-12);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_lex_extremes() {
        let x = [
            Complex64::new(1.0, 3.0),
            Complex64::new(-3.0, 1.0),
            Complex64::new(1.0, -3.0),
            Complex64::new(-3.0, -3.0),
        ];
        let (lo, hi) = lex_extremes(&x).unwrap();
        assert_eq!(lo, Complex64::new(-3.0, -3.0));
        assert_eq!(hi, Complex64::new(1.0, 3.0));
        assert!(lex_extremes(&[]).is_none());
    }
}
