//! Benchmark workloads for ranged containers and persistence.
//!
//! All data comes from a seeded ChaCha8 generator, so every run measures
//! the same values:
//!
//! - [`random_reals`] / [`random_complex`]: uniform values in `[-scale, scale)`
//! - [`random_vector`] / [`random_matrix`]: containers filled with them

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use num_complex::Complex;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ranged_arena::{ArrayContext, BoundedMatrix, BoundedVector};
use ranged_core::{ArrayError, IndexRange};

/// Uniform `f64` in `[0, 1)` from the top 53 bits of one draw.
fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// `n` reals uniform in `[-scale, scale)`.
pub fn random_reals(seed: u64, n: usize, scale: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| (unit(&mut rng) * 2.0 - 1.0) * scale).collect()
}

/// `n` complex values with both parts uniform in `[-scale, scale)`.
pub fn random_complex(seed: u64, n: usize, scale: f64) -> Vec<Complex<f64>> {
    random_reals(seed, 2 * n, scale)
        .chunks_exact(2)
        .map(|p| Complex::new(p[0], p[1]))
        .collect()
}

/// Vector over `[lo, lo + n - 1]` of random reals.
pub fn random_vector(
    ctx: &ArrayContext,
    seed: u64,
    lo: isize,
    n: usize,
) -> Result<BoundedVector<f64>, ArrayError> {
    BoundedVector::from_values(ctx, lo, &random_reals(seed, n, 1e3))
}

/// Matrix over `rows` x `cols` of random reals, filled row-major.
pub fn random_matrix(
    ctx: &ArrayContext,
    seed: u64,
    rows: IndexRange,
    cols: IndexRange,
) -> Result<BoundedMatrix<f64>, ArrayError> {
    let values = random_reals(seed, rows.len() * cols.len(), 1e3);
    let width = cols.len();
    BoundedMatrix::from_fn(ctx, rows, cols, |r, c| {
        let at = (r - rows.lo) as usize * width + (c - cols.lo) as usize;
        values[at]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        assert_eq!(random_reals(7, 16, 1.0), random_reals(7, 16, 1.0));
        assert_ne!(random_reals(7, 16, 1.0), random_reals(8, 16, 1.0));
    }

    #[test]
    fn values_stay_in_scale() {
        assert!(random_reals(1, 1000, 5.0).iter().all(|v| (-5.0..5.0).contains(v)));
        assert_eq!(random_complex(1, 10, 1.0).len(), 10);
    }

    #[test]
    fn matrix_is_filled_row_major() {
        let ctx = ArrayContext::new();
        let rows = IndexRange::new(2, 3);
        let cols = IndexRange::new(-1, 1);
        let m = random_matrix(&ctx, 9, rows, cols).unwrap();
        assert_eq!(m.as_slice(), random_reals(9, 6, 1e3).as_slice());
    }
}
