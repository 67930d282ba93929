//! Persistence of [`BoundedVector`]s.

use std::io::{BufRead, Read, Write};

use ranged_arena::{ArrayContext, BoundedVector};
use ranged_core::{ArrayKind, IndexRange};
use smallvec::smallvec;

use crate::binary::{BinaryReader, BinaryWriter};
use crate::codec::StorageCodec;
use crate::error::{ElementPath, PersistError};
use crate::text::{TextReader, TextWriter};

/// Write `v` in text form under `name`, one line per element.
pub fn write_vector_text<C, W>(
    v: &BoundedVector<C::Value>,
    w: &mut TextWriter<W>,
    name: &str,
) -> Result<(), PersistError>
where
    C: StorageCodec,
    W: Write,
{
    w.intro(format_args!("{name} []"), v.is_empty())
        .map_err(PersistError::Write)?;
    for (i, x) in v.iter_indexed() {
        w.value_line(format_args!("{name} [{i}]"), &C::to_text(*x))
            .map_err(PersistError::Write)?;
    }
    w.exdent();
    Ok(())
}

/// Write the elements of `v` in binary form, in index order.
pub fn write_vector_binary<C, W>(
    v: &BoundedVector<C::Value>,
    w: &mut BinaryWriter<W>,
) -> Result<(), PersistError>
where
    C: StorageCodec,
    W: Write,
{
    for x in v.as_slice() {
        C::write_binary(*x, w).map_err(PersistError::Write)?;
    }
    Ok(())
}

/// Allocate a vector over `range` and fill it from text.
///
/// On failure the partial vector is freed and the error names the element
/// that could not be read.
pub fn read_vector_text<C, R>(
    ctx: &ArrayContext,
    range: IndexRange,
    r: &mut TextReader<R>,
    name: &str,
) -> Result<BoundedVector<C::Value>, PersistError>
where
    C: StorageCodec,
    R: BufRead,
{
    let mut v = ctx.vector::<C::Value>(range)?;
    for i in range {
        match r.read::<C>() {
            Ok(x) => v[i] = x,
            Err(cause) => {
                v.free();
                let at = ElementPath::new(name, smallvec![i]);
                return Err(PersistError::aborted(ArrayKind::Vector, Some(at), cause));
            }
        }
    }
    Ok(v)
}

/// Allocate a vector over `range` and fill it from binary values.
pub fn read_vector_binary<C, R>(
    ctx: &ArrayContext,
    range: IndexRange,
    r: &mut BinaryReader<R>,
) -> Result<BoundedVector<C::Value>, PersistError>
where
    C: StorageCodec,
    R: Read,
{
    let mut v = ctx.vector::<C::Value>(range)?;
    for i in range {
        match C::read_binary(r) {
            Ok(x) => v[i] = x,
            Err(cause) => {
                v.free();
                return Err(PersistError::aborted(ArrayKind::Vector, None, cause));
            }
        }
    }
    Ok(v)
}
