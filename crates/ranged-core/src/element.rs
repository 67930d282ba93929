//! Values that can be stored in a ranged container.

use std::fmt;

use num_complex::Complex;

/// A plain value type storable in vectors, matrices, and tensors.
///
/// Containers hand out zero-initialised storage, so every element type
/// names its all-zero value. Equality between containers is exact-bits
/// equality: two floats compare equal only if their bit patterns match,
/// so `0.0` and `-0.0` differ and a NaN equals an identical NaN.
pub trait Element: Copy + fmt::Debug + 'static {
    /// The all-zero-bytes value of this type.
    const ZERO: Self;

    /// Whether `self` and `other` have identical bit patterns.
    fn same_bits(&self, other: &Self) -> bool;
}

macro_rules! integer_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const ZERO: Self = 0;

                #[inline]
                fn same_bits(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

integer_element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Element for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn same_bits(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn same_bits(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T: Element> Element for Complex<T> {
    const ZERO: Self = Complex::new(T::ZERO, T::ZERO);

    #[inline]
    fn same_bits(&self, other: &Self) -> bool {
        self.re.same_bits(&other.re) && self.im.same_bits(&other.im)
    }
}

/// Exact-bits comparison of two element slices.
///
/// Slices of different length are never equal.
pub fn slices_same_bits<T: Element>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_bits(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zero_bits() {
        assert_eq!(f64::ZERO.to_bits(), 0);
        assert_eq!(f32::ZERO.to_bits(), 0);
        let c = <Complex<f64> as Element>::ZERO;
        assert_eq!((c.re.to_bits(), c.im.to_bits()), (0, 0));
        assert_eq!(<isize as Element>::ZERO, 0);
    }

    #[test]
    fn signed_zeros_differ() {
        assert!(!0.0f64.same_bits(&-0.0));
        assert!(0.0f64 == -0.0);
    }

    #[test]
    fn identical_nans_match() {
        let nan = f64::NAN;
        assert!(nan.same_bits(&nan));
        assert!(!nan.same_bits(&-nan));
    }

    #[test]
    fn complex_compares_both_parts() {
        let a = Complex::new(1.0f64, 2.0);
        assert!(a.same_bits(&Complex::new(1.0, 2.0)));
        assert!(!a.same_bits(&Complex::new(1.0, -2.0)));
    }

    #[test]
    fn slice_comparison_checks_length() {
        assert!(slices_same_bits(&[1u8, 2], &[1, 2]));
        assert!(!slices_same_bits(&[1u8, 2], &[1, 2, 3]));
        assert!(!slices_same_bits(&[1.0f32], &[1.5]));
    }
}
