//! Three-rank tensors over arbitrary plane, row, and column ranges.
//!
//! Cells are stored plane-major, then row-major, in one [`Block`]. Plane
//! and row slices are computed from strides on access.

use std::ops::{Index, IndexMut};

use ranged_core::{ArrayError, ArrayKind, Bounds, Element, IndexRange, LiveToken, Operation};
use smallvec::smallvec;
use tracing::trace;

use crate::block::{Block, Caption};
use crate::context::ArrayContext;

const KIND: ArrayKind = ArrayKind::Tensor3;

/// A contiguous tensor addressable over `planes x rows x cols`.
///
/// Empty when any of the three ranges is empty; an empty tensor owns no
/// block and is not registered with the live counter.
#[derive(Debug)]
pub struct BoundedTensor3<T: Element> {
    planes: IndexRange,
    rows: IndexRange,
    cols: IndexRange,
    cells: Block<T>,
    token: Option<LiveToken>,
    ctx: ArrayContext,
}

impl<T: Element> BoundedTensor3<T> {
    pub(crate) fn create(
        ctx: &ArrayContext,
        planes: IndexRange,
        rows: IndexRange,
        cols: IndexRange,
    ) -> Result<Self, ArrayError> {
        if planes.is_empty() || rows.is_empty() || cols.is_empty() {
            return Ok(Self {
                planes,
                rows,
                cols,
                cells: Block::empty(),
                token: None,
                ctx: ctx.clone(),
            });
        }
        let len = planes
            .checked_len()
            .and_then(|p| p.checked_mul(rows.checked_len()?))
            .and_then(|n| n.checked_mul(cols.checked_len()?))
            .ok_or(ArrayError::CapacityOverflow {
                kind: KIND,
                operation: Operation::Create,
            })?;
        let cells = Block::zeroed(ctx.config(), len, Caption::new(KIND, Operation::Create))?;
        let token = ctx.counter().acquire();
        trace!(kind = %KIND, %planes, %rows, %cols, live = ctx.live_count(), "container created");
        Ok(Self {
            planes,
            rows,
            cols,
            cells,
            token: Some(token),
            ctx: ctx.clone(),
        })
    }

    /// Build a tensor whose cell `(p, r, c)` is `f(p, r, c)`.
    pub fn from_fn(
        ctx: &ArrayContext,
        planes: IndexRange,
        rows: IndexRange,
        cols: IndexRange,
        mut f: impl FnMut(isize, isize, isize) -> T,
    ) -> Result<Self, ArrayError> {
        let mut t = Self::create(ctx, planes, rows, cols)?;
        for p in planes.iter() {
            for r in rows.iter() {
                for c in cols.iter() {
                    t[(p, r, c)] = f(p, r, c);
                }
            }
        }
        Ok(t)
    }

    /// Release the tensor. Equivalent to dropping it.
    pub fn free(self) {}

    /// The plane range.
    pub fn planes(&self) -> IndexRange {
        self.planes
    }

    /// The row range.
    pub fn rows(&self) -> IndexRange {
        self.rows
    }

    /// The column range.
    pub fn cols(&self) -> IndexRange {
        self.cols
    }

    /// Plane, row, and column ranges in that order.
    pub fn bounds(&self) -> Bounds {
        smallvec![self.planes, self.rows, self.cols]
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the tensor has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The context this tensor allocates from.
    pub fn context(&self) -> &ArrayContext {
        &self.ctx
    }

    /// Cells per plane, or `None` if the count does not fit in `usize`.
    fn plane_stride(&self) -> Option<usize> {
        self.rows.len().checked_mul(self.cols.len())
    }

    fn offset(&self, p: isize, r: isize, c: isize) -> Option<usize> {
        let plane = self.planes.offset_of(p)?;
        let row = self.rows.offset_of(r)?;
        let col = self.cols.offset_of(c)?;
        plane
            .checked_mul(self.plane_stride()?)?
            .checked_add(row.checked_mul(self.cols.len())?)?
            .checked_add(col)
    }

    /// Cell `(p, r, c)`, or `None` if any index is out of range.
    pub fn get(&self, p: isize, r: isize, c: isize) -> Option<&T> {
        let offset = self.offset(p, r, c)?;
        self.cells.as_slice().get(offset)
    }

    /// Mutable cell `(p, r, c)`, or `None` if any index is out of range.
    pub fn get_mut(&mut self, p: isize, r: isize, c: isize) -> Option<&mut T> {
        let offset = self.offset(p, r, c)?;
        self.cells.as_mut_slice().get_mut(offset)
    }

    /// The cells of plane `p` in row-major order.
    pub fn plane(&self, p: isize) -> Option<&[T]> {
        let plane = self.planes.offset_of(p)?;
        let stride = self.plane_stride()?;
        let start = plane.checked_mul(stride)?;
        self.cells.as_slice().get(start..start.checked_add(stride)?)
    }

    /// The cells of row `r` of plane `p` in column order.
    pub fn row(&self, p: isize, r: isize) -> Option<&[T]> {
        let start = self.offset(p, r, self.cols.lo)?;
        self.cells.as_slice().get(start..start.checked_add(self.cols.len())?)
    }

    /// All cells in plane-major, row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.cells.as_slice()
    }

    /// All cells in plane-major, row-major order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.cells.as_mut_slice()
    }
}

impl<T: Element> Index<(isize, isize, isize)> for BoundedTensor3<T> {
    type Output = T;

    fn index(&self, (p, r, c): (isize, isize, isize)) -> &T {
        match self.get(p, r, c) {
            Some(v) => v,
            None => panic!(
                "index [{p}] [{r}] [{c}] out of bounds for three-rank tensor {} x {} x {}",
                self.planes, self.rows, self.cols
            ),
        }
    }
}

impl<T: Element> IndexMut<(isize, isize, isize)> for BoundedTensor3<T> {
    fn index_mut(&mut self, (p, r, c): (isize, isize, isize)) -> &mut T {
        let (planes, rows, cols) = (self.planes, self.rows, self.cols);
        match self.get_mut(p, r, c) {
            Some(v) => v,
            None => panic!(
                "index [{p}] [{r}] [{c}] out of bounds for three-rank tensor \
                 {planes} x {rows} x {cols}"
            ),
        }
    }
}

impl<T: Element> Drop for BoundedTensor3<T> {
    fn drop(&mut self) {
        if self.token.is_some() {
            trace!(
                kind = %KIND,
                planes = %self.planes,
                rows = %self.rows,
                cols = %self.cols,
                "container released"
            );
        }
    }
}
