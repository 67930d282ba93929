//! Two-dimensional row-major matrices over arbitrary row and column ranges.
//!
//! All cells of a [`BoundedMatrix`] live in one [`Block`] in row-major order
//! with no padding: row `r` starts `(r - row1) * (col2 - col1 + 1)` cells
//! into the block. Row slices are derived from that stride on access and
//! are never stored or reallocated independently, so whole-matrix copy and
//! comparison can treat the cells as one flat run.

use std::ops::{Index, IndexMut};

use ranged_core::{
    slices_same_bits, ArrayError, ArrayKind, Bounds, Element, IndexRange, LiveToken, Operation,
};
use smallvec::smallvec;
use tracing::trace;

use crate::block::{Block, Caption};
use crate::context::ArrayContext;

const KIND: ArrayKind = ArrayKind::Matrix;

/// A contiguous matrix addressable over `[row1, row2] x [col1, col2]`.
///
/// A matrix with an empty row range or an empty column range owns no
/// block and is not registered with the live counter.
#[derive(Debug)]
pub struct BoundedMatrix<T: Element> {
    rows: IndexRange,
    cols: IndexRange,
    cells: Block<T>,
    token: Option<LiveToken>,
    ctx: ArrayContext,
}

/// Number of cells in a `rows x cols` matrix, or `None` on overflow.
fn cell_count(rows: IndexRange, cols: IndexRange) -> Option<usize> {
    rows.checked_len()?.checked_mul(cols.checked_len()?)
}

impl<T: Element> BoundedMatrix<T> {
    pub(crate) fn create(
        ctx: &ArrayContext,
        rows: IndexRange,
        cols: IndexRange,
    ) -> Result<Self, ArrayError> {
        if rows.is_empty() || cols.is_empty() {
            return Ok(Self::empty(ctx, rows, cols));
        }
        let len = cell_count(rows, cols).ok_or(ArrayError::CapacityOverflow {
            kind: KIND,
            operation: Operation::Create,
        })?;
        let cells = Block::zeroed(ctx.config(), len, Caption::new(KIND, Operation::Create))?;
        Ok(Self::registered(ctx, rows, cols, cells))
    }

    /// Build a matrix whose cell `(r, c)` is `f(r, c)`.
    pub fn from_fn(
        ctx: &ArrayContext,
        rows: IndexRange,
        cols: IndexRange,
        mut f: impl FnMut(isize, isize) -> T,
    ) -> Result<Self, ArrayError> {
        let mut m = Self::create(ctx, rows, cols)?;
        for r in rows.iter() {
            for c in cols.iter() {
                m[(r, c)] = f(r, c);
            }
        }
        Ok(m)
    }

    fn empty(ctx: &ArrayContext, rows: IndexRange, cols: IndexRange) -> Self {
        Self {
            rows,
            cols,
            cells: Block::empty(),
            token: None,
            ctx: ctx.clone(),
        }
    }

    fn registered(ctx: &ArrayContext, rows: IndexRange, cols: IndexRange, cells: Block<T>) -> Self {
        let token = ctx.counter().acquire();
        trace!(kind = %KIND, %rows, %cols, live = ctx.live_count(), "container created");
        Self {
            rows,
            cols,
            cells,
            token: Some(token),
            ctx: ctx.clone(),
        }
    }

    /// Release the matrix. Equivalent to dropping it.
    pub fn free(self) {}

    /// The row range `[row1, row2]`.
    pub fn rows(&self) -> IndexRange {
        self.rows
    }

    /// The column range `[col1, col2]`.
    pub fn cols(&self) -> IndexRange {
        self.cols
    }

    /// Row and column ranges, rows first.
    pub fn bounds(&self) -> Bounds {
        smallvec![self.rows, self.cols]
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The context this matrix allocates from.
    pub fn context(&self) -> &ArrayContext {
        &self.ctx
    }

    fn offset(&self, r: isize, c: isize) -> Option<usize> {
        let row = self.rows.offset_of(r)?;
        let col = self.cols.offset_of(c)?;
        Some(row * self.cols.len() + col)
    }

    /// Cell `(r, c)`, or `None` if either index is out of range.
    pub fn get(&self, r: isize, c: isize) -> Option<&T> {
        let offset = self.offset(r, c)?;
        self.cells.as_slice().get(offset)
    }

    /// Mutable cell `(r, c)`, or `None` if either index is out of range.
    pub fn get_mut(&mut self, r: isize, c: isize) -> Option<&mut T> {
        let offset = self.offset(r, c)?;
        self.cells.as_mut_slice().get_mut(offset)
    }

    /// The cells of row `r` in column order.
    pub fn row(&self, r: isize) -> Option<&[T]> {
        let stride = self.cols.len();
        let start = self.rows.offset_of(r)? * stride;
        self.cells.as_slice().get(start..start + stride)
    }

    /// The cells of row `r` in column order, mutably.
    pub fn row_mut(&mut self, r: isize) -> Option<&mut [T]> {
        let stride = self.cols.len();
        let start = self.rows.offset_of(r)? * stride;
        self.cells.as_mut_slice().get_mut(start..start + stride)
    }

    /// All cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.cells.as_slice()
    }

    /// All cells in row-major order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.cells.as_mut_slice()
    }

    /// Iterate `(row, col, cell)` in row-major order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (isize, isize, &T)> + '_ {
        let cols = self.cols;
        self.rows
            .iter()
            .flat_map(move |r| cols.iter().map(move |c| (r, c)))
            .zip(self.cells.as_slice())
            .map(|((r, c), v)| (r, c, v))
    }

    fn check_same_bounds(&self, other: &Self) -> Result<(), ArrayError> {
        if self.rows == other.rows && self.cols == other.cols {
            return Ok(());
        }
        Err(ArrayError::ShapeMismatch {
            kind: KIND,
            expected: self.bounds(),
            found: other.bounds(),
        })
    }

    /// Allocate a new matrix with the same bounds and cells.
    pub fn copy(&self) -> Result<Self, ArrayError> {
        if self.cells.is_empty() {
            return Ok(Self::empty(&self.ctx, self.rows, self.cols));
        }
        let caption = Caption::new(KIND, Operation::Copy);
        let cells = Block::concat(self.ctx.config(), &[self.cells.as_slice()], caption)?;
        Ok(Self::registered(&self.ctx, self.rows, self.cols, cells))
    }

    /// Overwrite every cell with the cell at the same indices in `from`.
    ///
    /// Both matrices must have identical bounds.
    pub fn copy_elements_from(&mut self, from: &Self) -> Result<(), ArrayError> {
        self.check_same_bounds(from)?;
        self.cells.as_mut_slice().copy_from_slice(from.cells.as_slice());
        Ok(())
    }

    /// Exact-bits equality of two matrices with identical bounds.
    ///
    /// Matrices with different bounds are unequal.
    pub fn equal(&self, other: &Self) -> bool {
        self.check_same_bounds(other).is_ok()
            && slices_same_bits(self.cells.as_slice(), other.cells.as_slice())
    }
}

impl<T: Element> Index<(isize, isize)> for BoundedMatrix<T> {
    type Output = T;

    fn index(&self, (r, c): (isize, isize)) -> &T {
        match self.get(r, c) {
            Some(v) => v,
            None => panic!(
                "index [{r}] [{c}] out of bounds for matrix {} x {}",
                self.rows, self.cols
            ),
        }
    }
}

impl<T: Element> IndexMut<(isize, isize)> for BoundedMatrix<T> {
    fn index_mut(&mut self, (r, c): (isize, isize)) -> &mut T {
        let (rows, cols) = (self.rows, self.cols);
        match self.get_mut(r, c) {
            Some(v) => v,
            None => panic!("index [{r}] [{c}] out of bounds for matrix {rows} x {cols}"),
        }
    }
}

impl<T: Element> PartialEq for BoundedMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Element> Drop for BoundedMatrix<T> {
    fn drop(&mut self) {
        if self.token.is_some() {
            trace!(kind = %KIND, rows = %self.rows, cols = %self.cols, "container released");
        }
    }
}
