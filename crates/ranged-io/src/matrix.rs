//! Persistence of [`BoundedMatrix`]es, row-major.

use std::io::{BufRead, Read, Write};

use ranged_arena::{ArrayContext, BoundedMatrix};
use ranged_core::{ArrayKind, IndexRange};
use smallvec::smallvec;

use crate::binary::{BinaryReader, BinaryWriter};
use crate::codec::StorageCodec;
use crate::error::{ElementPath, PersistError};
use crate::text::{TextReader, TextWriter};

/// Write `m` in text form under `name`: one block per row, one line per cell.
pub fn write_matrix_text<C, W>(
    m: &BoundedMatrix<C::Value>,
    w: &mut TextWriter<W>,
    name: &str,
) -> Result<(), PersistError>
where
    C: StorageCodec,
    W: Write,
{
    w.intro(format_args!("{name} [] []"), m.is_empty())
        .map_err(PersistError::Write)?;
    if !m.is_empty() {
        for r in m.rows() {
            w.intro(format_args!("{name} [{r}]"), false)
                .map_err(PersistError::Write)?;
            for c in m.cols() {
                let x = m[(r, c)];
                w.value_line(format_args!("{name} [{r}] [{c}]"), &C::to_text(x))
                    .map_err(PersistError::Write)?;
            }
            w.exdent();
        }
    }
    w.exdent();
    Ok(())
}

/// Write the cells of `m` in binary form, row-major.
pub fn write_matrix_binary<C, W>(
    m: &BoundedMatrix<C::Value>,
    w: &mut BinaryWriter<W>,
) -> Result<(), PersistError>
where
    C: StorageCodec,
    W: Write,
{
    for x in m.as_slice() {
        C::write_binary(*x, w).map_err(PersistError::Write)?;
    }
    Ok(())
}

/// Allocate a matrix over `rows` x `cols` and fill it from text.
///
/// On failure the partial matrix is freed and the error names the cell
/// that could not be read.
pub fn read_matrix_text<C, R>(
    ctx: &ArrayContext,
    rows: IndexRange,
    cols: IndexRange,
    r: &mut TextReader<R>,
    name: &str,
) -> Result<BoundedMatrix<C::Value>, PersistError>
where
    C: StorageCodec,
    R: BufRead,
{
    let mut m = ctx.matrix::<C::Value>(rows, cols)?;
    for row in rows {
        for col in cols {
            match r.read::<C>() {
                Ok(x) => m[(row, col)] = x,
                Err(cause) => {
                    m.free();
                    let at = ElementPath::new(name, smallvec![row, col]);
                    return Err(PersistError::aborted(ArrayKind::Matrix, Some(at), cause));
                }
            }
        }
    }
    Ok(m)
}

/// Allocate a matrix over `rows` x `cols` and fill it from binary values.
pub fn read_matrix_binary<C, R>(
    ctx: &ArrayContext,
    rows: IndexRange,
    cols: IndexRange,
    r: &mut BinaryReader<R>,
) -> Result<BoundedMatrix<C::Value>, PersistError>
where
    C: StorageCodec,
    R: Read,
{
    let mut m = ctx.matrix::<C::Value>(rows, cols)?;
    let mut failure = None;
    for cell in m.as_mut_slice() {
        match C::read_binary(r) {
            Ok(x) => *cell = x,
            Err(cause) => {
                failure = Some(cause);
                break;
            }
        }
    }
    match failure {
        None => Ok(m),
        Some(cause) => {
            m.free();
            Err(PersistError::aborted(ArrayKind::Matrix, None, cause))
        }
    }
}
