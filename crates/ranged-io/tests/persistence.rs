//! End-to-end persistence of vectors and matrices through every layer.

use std::io::BufReader;

use num_complex::Complex;
use proptest::prelude::*;
use ranged_arena::{ArrayContext, BoundedMatrix, BoundedVector};
use ranged_core::IndexRange;
use ranged_io::{
    read_matrix_text, read_vector_binary, read_vector_text, write_matrix_text,
    write_vector_binary, write_vector_text, BinaryReader, BinaryWriter, ByteOrder, PersistConfig,
    PersistError, TextReader, TextWriter, ValueError, C64, I16, I32, Integer, R64,
};
use ranged_test_utils::{
    complex_ramp, int_ramp, real_ramp, FailingWriter, SinkFault, TruncatedReader,
};

fn isolated() -> ArrayContext {
    ArrayContext::new()
}

fn vector_text<C: ranged_io::StorageCodec>(v: &BoundedVector<C::Value>, name: &str) -> String {
    let mut w = TextWriter::new(Vec::new());
    write_vector_text::<C, _>(v, &mut w, name).unwrap();
    String::from_utf8(w.into_inner()).unwrap()
}

#[test]
fn three_integers_survive_binary() {
    let ctx = isolated();
    let v = BoundedVector::from_values(&ctx, 1, &[7i32, -8, 9]).unwrap();

    let mut w = BinaryWriter::new(Vec::new());
    write_vector_binary::<I32, _>(&v, &mut w).unwrap();
    let bytes = w.into_inner();
    assert_eq!(bytes.len(), 12);

    let mut r = BinaryReader::new(bytes.as_slice());
    let back = read_vector_binary::<I32, _>(&ctx, IndexRange::new(1, 3), &mut r).unwrap();
    assert_eq!(back.as_slice(), &[7, -8, 9]);
    assert_eq!(back, v);
}

#[test]
fn little_endian_binary_round_trip() {
    let ctx = isolated();
    let config = PersistConfig::new().with_byte_order(ByteOrder::Little);
    let v = BoundedVector::from_values(&ctx, -4, &[isize::MIN, 0, isize::MAX]).unwrap();

    let mut w = BinaryWriter::with_config(Vec::new(), &config);
    write_vector_binary::<Integer, _>(&v, &mut w).unwrap();
    let bytes = w.into_inner();
    assert_eq!(bytes[8..16], [0u8; 8]);

    let mut r = BinaryReader::with_config(bytes.as_slice(), &config);
    let back = read_vector_binary::<Integer, _>(&ctx, v.range(), &mut r).unwrap();
    assert_eq!(back, v);
}

#[test]
fn real_vector_survives_text() {
    let ctx = isolated();
    let values = real_ramp(20, 1.0 / 3.0);
    let v = BoundedVector::from_values(&ctx, 0, &values).unwrap();
    let text = vector_text::<R64>(&v, "x");

    let mut r = TextReader::new(text.as_bytes());
    let back = read_vector_text::<R64, _>(&ctx, v.range(), &mut r, "x").unwrap();
    assert_eq!(back, v);
}

#[test]
fn bad_token_at_index_two_frees_everything() {
    let ctx = isolated();
    let v = BoundedVector::from_values(&ctx, 1, &int_ramp(10, 4)).unwrap();
    let text = vector_text::<I32>(&v, "v").replace("v [2]: 11", "v [2]: eleven");
    drop(v);
    assert_eq!(ctx.live_count(), 0);

    let mut r = TextReader::new(text.as_bytes());
    let err = read_vector_text::<I32, _>(&ctx, IndexRange::new(1, 4), &mut r, "v").unwrap_err();
    let at = err.read_location().unwrap();
    assert_eq!(at.name, "v");
    assert_eq!(at.index.as_slice(), &[2]);
    assert!(err.to_string().starts_with("could not read v [2]:"));
    assert_eq!(ctx.live_count(), 0);
}

#[test]
fn out_of_range_text_value_is_reported() {
    let ctx = isolated();
    let mut r = TextReader::new("s []:\n    s [0]: 40000\n".as_bytes());
    let err = read_vector_text::<I16, _>(&ctx, IndexRange::new(0, 0), &mut r, "s").unwrap_err();
    assert!(matches!(
        err,
        PersistError::Read {
            cause: ValueError::OutOfRange { line: Some(2), .. },
            ..
        }
    ));
    assert_eq!(ctx.live_count(), 0);
}

#[test]
fn complex_matrix_survives_text() {
    let ctx = isolated();
    let values = complex_ramp(6);
    let rows = IndexRange::new(0, 1);
    let cols = IndexRange::new(-1, 1);
    let m = BoundedMatrix::from_fn(&ctx, rows, cols, |r, c| values[(r * 3 + c + 1) as usize])
        .unwrap();

    let mut w = TextWriter::new(Vec::new());
    write_matrix_text::<C64, _>(&m, &mut w, "z").unwrap();
    let text = String::from_utf8(w.into_inner()).unwrap();
    assert!(text.contains("    z [0]:\n        z [0] [-1]: 0 + 1 i\n"));

    let mut r = TextReader::new(BufReader::new(text.as_bytes()));
    let back = read_matrix_text::<C64, _>(&ctx, rows, cols, &mut r, "z").unwrap();
    assert!(back.equal(&m));
    assert_eq!(back[(1, 1)], Complex::new(2.5, -3.5));
}

#[test]
fn refused_write_is_a_write_failure() {
    let ctx = isolated();
    let v = BoundedVector::from_values(&ctx, 1, &[1i32, 2, 3]).unwrap();

    let mut w = BinaryWriter::new(FailingWriter::new(6, SinkFault::Error));
    let err = write_vector_binary::<I32, _>(&v, &mut w).unwrap_err();
    assert!(matches!(err, PersistError::Write(_)));

    let mut w = TextWriter::new(FailingWriter::new(10, SinkFault::Closed));
    let err = write_vector_text::<I32, _>(&v, &mut w, "v").unwrap_err();
    match err {
        PersistError::Write(e) => assert_eq!(e.kind(), std::io::ErrorKind::WriteZero),
        other => panic!("expected write failure, got {other:?}"),
    }
}

#[test]
fn lost_source_mid_text_is_an_io_failure() {
    let ctx = isolated();
    let v = BoundedVector::from_values(&ctx, 1, &[1i32, 2, 3]).unwrap();
    let text = vector_text::<I32>(&v, "v");
    let cut = text.find("v [3]").unwrap();

    let mut r = TextReader::new(TruncatedReader::failing(text, cut));
    let err = read_vector_text::<I32, _>(&ctx, v.range(), &mut r, "v").unwrap_err();
    assert_eq!(err.read_location().unwrap().to_string(), "v [3]");
    assert!(matches!(err, PersistError::Read { cause: ValueError::Io(_), .. }));
    drop(v);
    assert_eq!(ctx.live_count(), 0);
}

#[test]
fn empty_source_cannot_fill_a_vector() {
    let ctx = isolated();
    let mut r = BinaryReader::new(TruncatedReader::ending(Vec::new(), 0));
    let err = read_vector_binary::<R64, _>(&ctx, IndexRange::new(1, 1), &mut r).unwrap_err();
    assert!(matches!(
        err,
        PersistError::Read {
            at: None,
            cause: ValueError::UnexpectedEof
        }
    ));
}

proptest! {
    #[test]
    fn any_i32_vector_survives_text(lo in -50isize..50, values in prop::collection::vec(any::<i32>(), 0..40)) {
        let ctx = isolated();
        let v = BoundedVector::from_values(&ctx, lo, &values).unwrap();
        let text = vector_text::<I32>(&v, "p");
        let mut r = TextReader::new(text.as_bytes());
        let back = read_vector_text::<I32, _>(&ctx, v.range(), &mut r, "p").unwrap();
        prop_assert_eq!(back.as_slice(), values.as_slice());
    }
}
