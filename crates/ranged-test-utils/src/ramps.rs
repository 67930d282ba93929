//! Deterministic value sequences.

use num_complex::Complex;

/// `start, start + 1, ...`, `n` values.
pub fn int_ramp(start: i32, n: usize) -> Vec<i32> {
    (0..n).map(|k| start.wrapping_add(k as i32)).collect()
}

/// Values spaced by `step`, with a sign flip on every third to exercise
/// negative formatting.
pub fn real_ramp(n: usize, step: f64) -> Vec<f64> {
    (0..n)
        .map(|k| {
            let v = k as f64 * step;
            if k % 3 == 2 {
                -v
            } else {
                v
            }
        })
        .collect()
}

/// Complex values whose imaginary parts alternate in sign.
pub fn complex_ramp(n: usize) -> Vec<Complex<f64>> {
    (0..n)
        .map(|k| {
            let re = k as f64 * 0.5;
            let im = if k % 2 == 0 { re + 1.0 } else { -(re + 1.0) };
            Complex::new(re, im)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_have_requested_length() {
        assert_eq!(int_ramp(-2, 4), vec![-2, -1, 0, 1]);
        assert_eq!(real_ramp(3, 0.25), vec![0.0, 0.25, -0.5]);
        assert_eq!(complex_ramp(2)[1], Complex::new(0.5, -1.5));
    }
}
