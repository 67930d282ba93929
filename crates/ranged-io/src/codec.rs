//! Per-encoding value codecs.
//!
//! Each storage encoding is a zero-sized type implementing
//! [`StorageCodec`]. The container routines in [`crate::vector`] and
//! [`crate::matrix`] are generic over the codec, so only the single-value
//! conversions live here.

use std::io::{self, Read, Write};

use num_complex::Complex;
use ranged_core::Element;

use crate::binary::{BinaryReader, BinaryWriter};
use crate::error::ValueError;
use crate::storage::Storage;

/// Why a text token could not be converted to a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseFault {
    /// The token is not a number of the expected shape.
    Malformed,
    /// The token is a number but does not fit the value type.
    OutOfRange,
}

/// Encode and decode single values of one storage encoding.
pub trait StorageCodec {
    /// In-memory type of a value.
    type Value: Element;

    /// Runtime descriptor of this encoding.
    const STORAGE: Storage;

    /// Write one value in binary form.
    fn write_binary<W: Write>(v: Self::Value, w: &mut BinaryWriter<W>) -> io::Result<()>;

    /// Read one value in binary form.
    fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<Self::Value, ValueError>;

    /// Render one value as a text token.
    fn to_text(v: Self::Value) -> String;

    /// Parse one text token.
    fn parse_text(token: &str) -> Result<Self::Value, ParseFault>;
}

macro_rules! exact_integer_codec {
    ($($name:ident($t:ty, $storage:ident, $write:ident, $read:ident);)*) => {$(
        #[doc = concat!("`", stringify!($t), "` values, stored as `", stringify!($t), "`.")]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl StorageCodec for $name {
            type Value = $t;
            const STORAGE: Storage = Storage::$storage;

            fn write_binary<W: Write>(v: $t, w: &mut BinaryWriter<W>) -> io::Result<()> {
                w.$write(v)
            }

            fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<$t, ValueError> {
                r.$read()
            }

            fn to_text(v: $t) -> String {
                v.to_string()
            }

            fn parse_text(token: &str) -> Result<$t, ParseFault> {
                parse_integer(token)
            }
        }
    )*};
}

exact_integer_codec! {
    I8(i8, I8, write_i8, read_i8);
    I16(i16, I16, write_i16, read_i16);
    I32(i32, I32, write_i32, read_i32);
    U8(u8, U8, write_u8, read_u8);
    U16(u16, U16, write_u16, read_u16);
    U32(u32, U32, write_u32, read_u32);
}

/// Native-width signed integers, stored as 64 bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Integer;

impl StorageCodec for Integer {
    type Value = isize;
    const STORAGE: Storage = Storage::Integer;

    fn write_binary<W: Write>(v: isize, w: &mut BinaryWriter<W>) -> io::Result<()> {
        // isize is at most 64 bits on every supported target.
        w.write_i64(v as i64)
    }

    fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<isize, ValueError> {
        let wide = r.read_i64()?;
        isize::try_from(wide).map_err(|_| ValueError::OutOfRange {
            token: wide.to_string(),
            storage: Storage::Integer,
            line: None,
        })
    }

    fn to_text(v: isize) -> String {
        v.to_string()
    }

    fn parse_text(token: &str) -> Result<isize, ParseFault> {
        parse_integer(token)
    }
}

/// Reals stored as 32-bit floats; values are narrowed on write.
#[derive(Clone, Copy, Debug, Default)]
pub struct R32;

impl StorageCodec for R32 {
    type Value = f64;
    const STORAGE: Storage = Storage::R32;

    fn write_binary<W: Write>(v: f64, w: &mut BinaryWriter<W>) -> io::Result<()> {
        w.write_f32(v as f32)
    }

    fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<f64, ValueError> {
        Ok(f64::from(r.read_f32()?))
    }

    fn to_text(v: f64) -> String {
        format_real(v as f32)
    }

    fn parse_text(token: &str) -> Result<f64, ParseFault> {
        parse_narrow_real(token).map(f64::from)
    }
}

/// Reals stored as 64-bit floats.
#[derive(Clone, Copy, Debug, Default)]
pub struct R64;

impl StorageCodec for R64 {
    type Value = f64;
    const STORAGE: Storage = Storage::R64;

    fn write_binary<W: Write>(v: f64, w: &mut BinaryWriter<W>) -> io::Result<()> {
        w.write_f64(v)
    }

    fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<f64, ValueError> {
        r.read_f64()
    }

    fn to_text(v: f64) -> String {
        format_real(v)
    }

    fn parse_text(token: &str) -> Result<f64, ParseFault> {
        parse_real(token)
    }
}

/// Complex values stored as two 32-bit floats, real part first.
#[derive(Clone, Copy, Debug, Default)]
pub struct C64;

impl StorageCodec for C64 {
    type Value = Complex<f64>;
    const STORAGE: Storage = Storage::C64;

    fn write_binary<W: Write>(v: Complex<f64>, w: &mut BinaryWriter<W>) -> io::Result<()> {
        w.write_f32(v.re as f32)?;
        w.write_f32(v.im as f32)
    }

    fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<Complex<f64>, ValueError> {
        let re = r.read_f32()?;
        let im = r.read_f32()?;
        Ok(Complex::new(f64::from(re), f64::from(im)))
    }

    fn to_text(v: Complex<f64>) -> String {
        format_complex(
            format_real(v.re as f32),
            v.im.is_sign_negative(),
            format_real(v.im.abs() as f32),
        )
    }

    fn parse_text(token: &str) -> Result<Complex<f64>, ParseFault> {
        let (re, im) = parse_complex(token, parse_narrow_real)?;
        Ok(Complex::new(f64::from(re), f64::from(im)))
    }
}

/// Complex values stored as two 64-bit floats, real part first.
#[derive(Clone, Copy, Debug, Default)]
pub struct C128;

impl StorageCodec for C128 {
    type Value = Complex<f64>;
    const STORAGE: Storage = Storage::C128;

    fn write_binary<W: Write>(v: Complex<f64>, w: &mut BinaryWriter<W>) -> io::Result<()> {
        w.write_f64(v.re)?;
        w.write_f64(v.im)
    }

    fn read_binary<R: Read>(r: &mut BinaryReader<R>) -> Result<Complex<f64>, ValueError> {
        let re = r.read_f64()?;
        let im = r.read_f64()?;
        Ok(Complex::new(re, im))
    }

    fn to_text(v: Complex<f64>) -> String {
        format_complex(format_real(v.re), v.im.is_sign_negative(), format_real(v.im.abs()))
    }

    fn parse_text(token: &str) -> Result<Complex<f64>, ParseFault> {
        let (re, im) = parse_complex(token, parse_real)?;
        Ok(Complex::new(re, im))
    }
}

fn parse_integer<T: TryFrom<i128>>(token: &str) -> Result<T, ParseFault> {
    let wide: i128 = token.trim().parse().map_err(|_| ParseFault::Malformed)?;
    T::try_from(wide).map_err(|_| ParseFault::OutOfRange)
}

fn parse_real(token: &str) -> Result<f64, ParseFault> {
    token.trim().parse().map_err(|_| ParseFault::Malformed)
}

/// Parse at full precision, then reject finite values that overflow `f32`.
fn parse_narrow_real(token: &str) -> Result<f32, ParseFault> {
    let wide = parse_real(token)?;
    let narrow = wide as f32;
    if wide.is_finite() && narrow.is_infinite() {
        return Err(ParseFault::OutOfRange);
    }
    Ok(narrow)
}

/// Shortest round-trip text; scientific notation outside `[1e-5, 1e16)`.
fn format_real<F>(v: F) -> String
where
    F: Copy + Into<f64> + std::fmt::Display + std::fmt::LowerExp,
{
    let wide: f64 = v.into();
    let magnitude = wide.abs();
    if wide != 0.0 && wide.is_finite() && !(1e-5..1e16).contains(&magnitude) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

fn format_complex(re: String, negative_im: bool, im_abs: String) -> String {
    let sign = if negative_im { '-' } else { '+' };
    format!("{re} {sign} {im_abs} i")
}

/// Accepts `re + im i`, `re - im i`, or a bare real part.
fn parse_complex<F>(
    token: &str,
    part: impl Fn(&str) -> Result<F, ParseFault>,
) -> Result<(F, F), ParseFault>
where
    F: std::ops::Neg<Output = F> + Default,
{
    let token = token.trim();
    let Some(body) = token.strip_suffix('i') else {
        return Ok((part(token)?, F::default()));
    };
    if let Some((re, im)) = body.split_once(" + ") {
        Ok((part(re)?, part(im)?))
    } else if let Some((re, im)) = body.split_once(" - ") {
        Ok((part(re)?, -part(im)?))
    } else {
        Err(ParseFault::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn binary_round_trip<C: StorageCodec>(v: C::Value) -> C::Value {
        let mut w = BinaryWriter::new(Vec::new());
        C::write_binary(v, &mut w).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), C::STORAGE.wire_width());
        C::read_binary(&mut BinaryReader::new(bytes.as_slice())).unwrap()
    }

    #[test]
    fn integer_tokens_are_range_checked() {
        assert_eq!(I8::parse_text("-128"), Ok(-128));
        assert_eq!(I8::parse_text("128"), Err(ParseFault::OutOfRange));
        assert_eq!(U16::parse_text("-1"), Err(ParseFault::OutOfRange));
        assert_eq!(U32::parse_text(" 4294967295 "), Ok(u32::MAX));
        assert_eq!(I32::parse_text("12x"), Err(ParseFault::Malformed));
        assert_eq!(Integer::parse_text("abc"), Err(ParseFault::Malformed));
    }

    #[test]
    fn integer_is_eight_bytes_on_the_wire() {
        assert_eq!(binary_round_trip::<Integer>(-5), -5);
        let mut w = BinaryWriter::new(Vec::new());
        Integer::write_binary(1, &mut w).unwrap();
        assert_eq!(w.into_inner(), vec![0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn reals_format_compactly() {
        assert_eq!(R64::to_text(0.5), "0.5");
        assert_eq!(R64::to_text(-3.0), "-3");
        assert_eq!(R64::to_text(0.0), "0");
        assert_eq!(R64::to_text(1e300), "1e300");
        assert_eq!(R64::to_text(2.5e-7), "2.5e-7");
        assert_eq!(R64::to_text(f64::INFINITY), "inf");
        assert_eq!(R32::to_text(0.1), "0.1");
    }

    #[test]
    fn special_reals_parse() {
        assert_eq!(R64::parse_text("-inf"), Ok(f64::NEG_INFINITY));
        assert!(R64::parse_text("NaN").unwrap().is_nan());
        assert_eq!(R64::parse_text("1e-300"), Ok(1e-300));
        assert_eq!(R64::parse_text("one"), Err(ParseFault::Malformed));
    }

    #[test]
    fn r32_narrows_and_rejects_overflow() {
        assert_eq!(binary_round_trip::<R32>(0.1), f64::from(0.1f32));
        assert_eq!(R32::parse_text("1e40"), Err(ParseFault::OutOfRange));
        assert_eq!(R32::parse_text("inf"), Ok(f64::INFINITY));
    }

    #[test]
    fn complex_text_forms() {
        let z = Complex::new(1.5, -2.0);
        assert_eq!(C128::to_text(z), "1.5 - 2 i");
        assert_eq!(C128::parse_text("1.5 - 2 i"), Ok(z));
        assert_eq!(C128::parse_text("3"), Ok(Complex::new(3.0, 0.0)));
        assert_eq!(C128::parse_text("1e-7 + 4e20 i"), Ok(Complex::new(1e-7, 4e20)));
        assert_eq!(C128::parse_text("1 * 2 i"), Err(ParseFault::Malformed));
        assert_eq!(C64::to_text(Complex::new(0.0, 0.25)), "0 + 0.25 i");
    }

    #[test]
    fn complex_binary_widths() {
        let z = Complex::new(-1.0, 0.5);
        assert_eq!(binary_round_trip::<C64>(z), z);
        assert_eq!(binary_round_trip::<C128>(z), z);
    }

    #[test]
    fn negative_zero_imaginary_survives_text() {
        let z = Complex::new(1.0, -0.0);
        let back = C128::parse_text(&C128::to_text(z)).unwrap();
        assert!(back.same_bits(&z));
    }

    proptest! {
        #[test]
        fn r64_text_is_exact(v in any::<f64>().prop_filter("not nan", |v| !v.is_nan())) {
            let back = R64::parse_text(&R64::to_text(v)).unwrap();
            prop_assert_eq!(back.to_bits(), v.to_bits());
        }

        #[test]
        fn i32_text_is_exact(v in any::<i32>()) {
            prop_assert_eq!(I32::parse_text(&I32::to_text(v)), Ok(v));
        }

        #[test]
        fn c128_text_is_exact(re in -1e30f64..1e30, im in -1e30f64..1e30) {
            let z = Complex::new(re, im);
            prop_assert!(C128::parse_text(&C128::to_text(z)).unwrap().same_bits(&z));
        }
    }
}
