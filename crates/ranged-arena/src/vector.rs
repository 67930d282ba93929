//! One-dimensional vectors over an arbitrary index range.
//!
//! A [`BoundedVector`] is addressed by raw indices `i` in `[lo, hi]`; the
//! storage offset `i - lo` is computed at the access site. Vectors are the
//! only containers that grow: [`append`](BoundedVector::append) and
//! [`insert`](BoundedVector::insert) may move the block, which the borrow
//! checker already forbids callers from observing through stale slices.

use std::ops::{Index, IndexMut};

use ranged_core::{
    slices_same_bits, ArrayError, ArrayKind, Element, IndexRange, LiveToken, Operation,
};
use tracing::trace;

use crate::block::{Block, Caption};
use crate::context::ArrayContext;

const KIND: ArrayKind = ArrayKind::Vector;

/// A contiguous vector addressable over `[lo, hi]`.
///
/// An empty range yields an empty vector that owns no block and is not
/// registered with the live counter; growing it allocates on demand.
#[derive(Debug)]
pub struct BoundedVector<T: Element> {
    range: IndexRange,
    cells: Block<T>,
    token: Option<LiveToken>,
    ctx: ArrayContext,
}

impl<T: Element> BoundedVector<T> {
    pub(crate) fn create(ctx: &ArrayContext, range: IndexRange) -> Result<Self, ArrayError> {
        if range.is_empty() {
            return Ok(Self::empty(ctx, range));
        }
        let caption = Caption::new(KIND, Operation::Create);
        let len = range.checked_len().ok_or(ArrayError::CapacityOverflow {
            kind: KIND,
            operation: Operation::Create,
        })?;
        let cells = Block::zeroed(ctx.config(), len, caption)?;
        Ok(Self::registered(ctx, range, cells))
    }

    /// Build a vector starting at `lo` holding a copy of `values`.
    pub fn from_values(ctx: &ArrayContext, lo: isize, values: &[T]) -> Result<Self, ArrayError> {
        if values.is_empty() {
            return Ok(Self::empty(ctx, IndexRange::empty_at(lo)));
        }
        let overflow = ArrayError::CapacityOverflow {
            kind: KIND,
            operation: Operation::Create,
        };
        let span = isize::try_from(values.len()).map_err(|_| overflow.clone())?;
        let hi = lo.checked_add(span - 1).ok_or(overflow)?;
        let range = IndexRange::new(lo, hi);
        let cells = Block::concat(ctx.config(), &[values], Caption::new(KIND, Operation::Create))?;
        Ok(Self::registered(ctx, range, cells))
    }

    fn empty(ctx: &ArrayContext, range: IndexRange) -> Self {
        Self {
            range,
            cells: Block::empty(),
            token: None,
            ctx: ctx.clone(),
        }
    }

    fn registered(ctx: &ArrayContext, range: IndexRange, cells: Block<T>) -> Self {
        let token = ctx.counter().acquire();
        trace!(kind = %KIND, %range, live = ctx.live_count(), "container created");
        Self {
            range,
            cells,
            token: Some(token),
            ctx: ctx.clone(),
        }
    }

    /// Release the vector. Equivalent to dropping it.
    pub fn free(self) {}

    /// The index range `[lo, hi]`.
    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// Smallest valid index.
    pub fn lo(&self) -> isize {
        self.range.lo
    }

    /// Largest valid index.
    pub fn hi(&self) -> isize {
        self.range.hi
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The context this vector allocates from.
    pub fn context(&self) -> &ArrayContext {
        &self.ctx
    }

    /// Element at index `i`, or `None` if `i` is outside `[lo, hi]`.
    pub fn get(&self, i: isize) -> Option<&T> {
        let offset = self.range.offset_of(i)?;
        self.cells.as_slice().get(offset)
    }

    /// Mutable element at index `i`, or `None` if `i` is outside `[lo, hi]`.
    pub fn get_mut(&mut self, i: isize) -> Option<&mut T> {
        let offset = self.range.offset_of(i)?;
        self.cells.as_mut_slice().get_mut(offset)
    }

    /// All elements in index order.
    pub fn as_slice(&self) -> &[T] {
        self.cells.as_slice()
    }

    /// All elements in index order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.cells.as_mut_slice()
    }

    /// Iterate `(index, element)` pairs in ascending index order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (isize, &T)> + '_ {
        self.range.iter().zip(self.cells.as_slice())
    }

    /// The elements covering `sub`, which must lie within `[lo, hi]`.
    fn span(&self, sub: IndexRange) -> Result<&[T], ArrayError> {
        let (start, end) = self.span_offsets(sub)?;
        Ok(&self.cells.as_slice()[start..end])
    }

    fn span_offsets(&self, sub: IndexRange) -> Result<(usize, usize), ArrayError> {
        if sub.is_empty() {
            return Ok((0, 0));
        }
        match (self.range.offset_of(sub.lo), self.range.offset_of(sub.hi)) {
            (Some(start), Some(last)) => Ok((start, last + 1)),
            _ => Err(ArrayError::RangeNotCovered {
                requested: sub,
                available: self.range,
            }),
        }
    }

    /// Allocate a new vector with the same bounds and contents.
    ///
    /// The copy registers with the live counter independently.
    pub fn copy(&self) -> Result<Self, ArrayError> {
        if self.range.is_empty() {
            return Ok(Self::empty(&self.ctx, self.range));
        }
        let caption = Caption::new(KIND, Operation::Copy);
        let cells = Block::concat(self.ctx.config(), &[self.cells.as_slice()], caption)?;
        Ok(Self::registered(&self.ctx, self.range, cells))
    }

    /// Copy the elements of `from` over `sub` into the same indices of `self`.
    ///
    /// Both vectors must cover `sub`. An empty `sub` copies nothing.
    pub fn copy_elements_from(&mut self, from: &Self, sub: IndexRange) -> Result<(), ArrayError> {
        let source = from.span(sub)?;
        let (start, end) = self.span_offsets(sub)?;
        self.cells.as_mut_slice()[start..end].copy_from_slice(source);
        Ok(())
    }

    /// Exact-bits equality of the elements over `sub`.
    ///
    /// An empty `sub` compares equal. If either vector does not cover `sub`
    /// the vectors are reported unequal.
    pub fn equal_over(&self, other: &Self, sub: IndexRange) -> bool {
        match (self.span(sub), other.span(sub)) {
            (Ok(a), Ok(b)) => slices_same_bits(a, b),
            _ => false,
        }
    }

    /// Grow by one zero-initialised element at `hi + 1`.
    ///
    /// On an empty vector this allocates the single element `[lo, lo]`.
    /// The block may move.
    pub fn append(&mut self) -> Result<(), ArrayError> {
        let grown = self.range.grown().ok_or(ArrayError::CapacityOverflow {
            kind: KIND,
            operation: Operation::Append,
        })?;
        let caption = Caption::new(KIND, Operation::Append);
        if self.range.is_empty() {
            let cells = Block::zeroed(self.ctx.config(), 1, caption)?;
            *self = Self::registered(&self.ctx, grown, cells);
            return Ok(());
        }
        let new_len = self.cells.len() + 1;
        self.cells.resize(self.ctx.config(), new_len, caption)?;
        self.range = grown;
        Ok(())
    }

    /// Insert one zero-initialised element at `position`, shifting the
    /// elements at and after it up by one index.
    ///
    /// `position` must lie in `[lo, hi + 1]`; on an empty vector it must be
    /// `lo`. The vector is rebuilt into a fresh block, so this is O(n).
    pub fn insert(&mut self, position: isize) -> Result<(), ArrayError> {
        let grown = self.range.grown().ok_or(ArrayError::CapacityOverflow {
            kind: KIND,
            operation: Operation::Insert,
        })?;
        if !grown.contains(position) {
            return Err(ArrayError::IndexOutOfRange {
                index: position,
                range: grown,
            });
        }
        let caption = Caption::new(KIND, Operation::Insert);
        if self.range.is_empty() {
            let cells = Block::zeroed(self.ctx.config(), 1, caption)?;
            *self = Self::registered(&self.ctx, grown, cells);
            return Ok(());
        }
        let split = grown.offset_of(position).unwrap_or(self.cells.len());
        let (head, tail) = self.cells.as_slice().split_at(split);
        let cells = Block::concat(self.ctx.config(), &[head, &[T::ZERO], tail], caption)?;
        self.cells = cells;
        self.range = grown;
        Ok(())
    }
}

impl<T: Element> Index<isize> for BoundedVector<T> {
    type Output = T;

    fn index(&self, i: isize) -> &T {
        match self.get(i) {
            Some(v) => v,
            None => panic!("index {i} out of bounds for vector {}", self.range),
        }
    }
}

impl<T: Element> IndexMut<isize> for BoundedVector<T> {
    fn index_mut(&mut self, i: isize) -> &mut T {
        let range = self.range;
        match self.get_mut(i) {
            Some(v) => v,
            None => panic!("index {i} out of bounds for vector {range}"),
        }
    }
}

/// Bounds and exact bits must both match.
impl<T: Element> PartialEq for BoundedVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range && slices_same_bits(self.as_slice(), other.as_slice())
    }
}

impl<T: Element> Drop for BoundedVector<T> {
    fn drop(&mut self) {
        if self.token.is_some() {
            trace!(kind = %KIND, range = %self.range, "container released");
        }
    }
}
