//! Inclusive index ranges and multi-dimensional index paths.

use std::fmt;
use std::ops::RangeInclusive;

use smallvec::SmallVec;

/// Position of one element inside a vector, matrix, or three-rank tensor.
///
/// Holds one index per dimension, outermost first. Inline for up to three
/// dimensions, which covers every container in this workspace.
pub type IndexPath = SmallVec<[isize; 3]>;

/// An inclusive interval `[lo, hi]` of signed indices.
///
/// `hi < lo` is a legal empty range with zero elements. It is never an
/// error by itself; containers built over an empty range simply own no
/// storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    /// Smallest valid index.
    pub lo: isize,
    /// Largest valid index (inclusive).
    pub hi: isize,
}

impl IndexRange {
    /// Create the range `[lo, hi]`.
    pub const fn new(lo: isize, hi: isize) -> Self {
        Self { lo, hi }
    }

    /// The empty range `[lo, lo - 1]`.
    ///
    /// At `isize::MIN` no index lies below `lo`, so the result is
    /// `[isize::MIN + 1, isize::MIN]`.
    pub const fn empty_at(lo: isize) -> Self {
        match lo.checked_sub(1) {
            Some(hi) => Self::new(lo, hi),
            None => Self::new(isize::MIN + 1, isize::MIN),
        }
    }

    /// Whether the range contains no indices.
    pub const fn is_empty(&self) -> bool {
        self.hi < self.lo
    }

    /// Number of indices in the range, or `None` if it does not fit in `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        usize::try_from(self.hi as i128 - self.lo as i128 + 1).ok()
    }

    /// Number of indices in the range, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Whether `index` lies in `[lo, hi]`.
    pub const fn contains(&self, index: isize) -> bool {
        self.lo <= index && index <= self.hi
    }

    /// Zero-based storage offset of `index`, or `None` if it is out of range.
    #[inline]
    pub fn offset_of(&self, index: isize) -> Option<usize> {
        if !self.contains(index) {
            return None;
        }
        // lo <= index, so the difference is non-negative and bounded by hi - lo.
        Some((index as i128 - self.lo as i128) as usize)
    }

    /// Whether every index of `other` also lies in `self`.
    ///
    /// An empty `other` is covered by any range.
    pub const fn covers(&self, other: &IndexRange) -> bool {
        other.is_empty() || (self.lo <= other.lo && other.hi <= self.hi)
    }

    /// The range with `hi` moved up by one, or `None` on overflow.
    ///
    /// On an empty range this yields the one-element range `[lo, lo]`.
    pub fn grown(&self) -> Option<Self> {
        if self.is_empty() {
            return Some(Self::new(self.lo, self.lo));
        }
        Some(Self::new(self.lo, self.hi.checked_add(1)?))
    }

    /// Iterate the indices in ascending order.
    pub fn iter(&self) -> RangeInclusive<isize> {
        self.lo..=self.hi
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

impl From<(isize, isize)> for IndexRange {
    fn from((lo, hi): (isize, isize)) -> Self {
        Self::new(lo, hi)
    }
}

impl From<RangeInclusive<isize>> for IndexRange {
    fn from(r: RangeInclusive<isize>) -> Self {
        Self::new(*r.start(), *r.end())
    }
}

impl IntoIterator for IndexRange {
    type Item = isize;
    type IntoIter = RangeInclusive<isize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
