//! Raw contiguous cell blocks.
//!
//! A [`Block`] is the only storage primitive in this crate: one contiguous
//! run of elements, obtained from the system allocator with fallible
//! reservation so that exhaustion is reported instead of aborting. Every
//! request carries a [`Caption`] naming the container and operation it
//! serves; failures are converted into a captioned [`ArrayError`] here, at
//! the one place allocation happens.

use ranged_core::{ArrayError, ArrayKind, Element, Operation};
use tracing::debug;

use crate::config::AllocatorConfig;

/// Which container and operation a block request is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caption {
    /// The container being built.
    pub kind: ArrayKind,
    /// What is being done to it.
    pub operation: Operation,
}

impl Caption {
    /// Create a caption.
    pub const fn new(kind: ArrayKind, operation: Operation) -> Self {
        Self { kind, operation }
    }

    fn overflow(self) -> ArrayError {
        ArrayError::CapacityOverflow {
            kind: self.kind,
            operation: self.operation,
        }
    }

    fn failed(self, bytes: usize) -> ArrayError {
        debug!(
            kind = %self.kind,
            operation = ?self.operation,
            bytes,
            "block allocation failed"
        );
        ArrayError::AllocationFailed {
            kind: self.kind,
            operation: self.operation,
            bytes,
        }
    }
}

/// Size in bytes of `len` elements of `T`, or `None` on overflow.
pub fn byte_size<T>(len: usize) -> Option<usize> {
    len.checked_mul(std::mem::size_of::<T>())
}

/// One contiguous run of elements.
///
/// The block never shrinks or splits behind the owner's back; containers
/// rely on it being a single unbroken region for their flat copy and
/// comparison operations.
#[derive(Debug)]
pub struct Block<T> {
    cells: Vec<T>,
}

impl<T: Element> Block<T> {
    /// A block with no storage.
    pub const fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Allocate `len` zero-initialised elements.
    pub fn zeroed(
        config: &AllocatorConfig,
        len: usize,
        caption: Caption,
    ) -> Result<Self, ArrayError> {
        let mut cells = reserve::<T>(config, len, caption)?;
        cells.resize(len, T::ZERO);
        Ok(Self { cells })
    }

    /// Allocate a block holding the concatenation of `parts`.
    ///
    /// Used for copies (a single part) and for structural inserts, where
    /// the new block is assembled from the old one without an intermediate
    /// zero-fill.
    pub fn concat(
        config: &AllocatorConfig,
        parts: &[&[T]],
        caption: Caption,
    ) -> Result<Self, ArrayError> {
        let len = parts
            .iter()
            .try_fold(0usize, |acc, p| acc.checked_add(p.len()))
            .ok_or_else(|| caption.overflow())?;
        let mut cells = reserve::<T>(config, len, caption)?;
        for part in parts {
            cells.extend_from_slice(part);
        }
        Ok(Self { cells })
    }

    /// Change the block length to `new_len`, zero-filling any new slots.
    ///
    /// The block may move. On failure the block is left unchanged.
    pub fn resize(
        &mut self,
        config: &AllocatorConfig,
        new_len: usize,
        caption: Caption,
    ) -> Result<(), ArrayError> {
        let bytes = byte_size::<T>(new_len).ok_or_else(|| caption.overflow())?;
        if !config.permits(bytes) {
            return Err(caption.failed(bytes));
        }
        if new_len > self.cells.len() {
            self.cells
                .try_reserve_exact(new_len - self.cells.len())
                .map_err(|_| caption.failed(bytes))?;
        }
        self.cells.resize(new_len, T::ZERO);
        Ok(())
    }

    /// Release the block.
    pub fn free(self) {}

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the block holds no elements.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Size of the block contents in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.cells.len() * std::mem::size_of::<T>()
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

/// Reserve room for exactly `len` elements, honouring the configured ceiling.
fn reserve<T>(
    config: &AllocatorConfig,
    len: usize,
    caption: Caption,
) -> Result<Vec<T>, ArrayError> {
    let bytes = byte_size::<T>(len).ok_or_else(|| caption.overflow())?;
    if !config.permits(bytes) {
        return Err(caption.failed(bytes));
    }
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| caption.failed(bytes))?;
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE: Caption = Caption::new(ArrayKind::Vector, Operation::Create);

    #[test]
    fn zeroed_block_is_all_zero() {
        let b = Block::<f64>::zeroed(&AllocatorConfig::new(), 16, CREATE).unwrap();
        assert_eq!(b.len(), 16);
        assert_eq!(b.memory_bytes(), 128);
        assert!(b.as_slice().iter().all(|v| v.to_bits() == 0));
    }

    #[test]
    fn ceiling_rejects_oversized_request() {
        let config = AllocatorConfig::new().with_max_block_bytes(63);
        let err = Block::<f64>::zeroed(&config, 8, CREATE).unwrap_err();
        assert_eq!(
            err,
            ArrayError::AllocationFailed {
                kind: ArrayKind::Vector,
                operation: Operation::Create,
                bytes: 64,
            }
        );
    }

    #[test]
    fn element_count_overflow_is_reported() {
        let err = Block::<u64>::zeroed(&AllocatorConfig::new(), usize::MAX, CREATE).unwrap_err();
        assert!(matches!(err, ArrayError::CapacityOverflow { .. }));
    }

    #[test]
    fn system_exhaustion_is_reported_not_aborted() {
        // Fits in usize but exceeds isize::MAX bytes, so reservation must fail.
        let err =
            Block::<u8>::zeroed(&AllocatorConfig::new(), usize::MAX / 2 + 1, CREATE).unwrap_err();
        assert!(matches!(err, ArrayError::AllocationFailed { .. }));
    }

    #[test]
    fn concat_joins_parts() {
        let b = Block::concat(&AllocatorConfig::new(), &[&[1i32, 2], &[0], &[3]], CREATE).unwrap();
        assert_eq!(b.as_slice(), &[1, 2, 0, 3]);
    }

    #[test]
    fn resize_zero_fills_new_slots() {
        let config = AllocatorConfig::new();
        let mut b = Block::concat(&config, &[&[7u16, 8]], CREATE).unwrap();
        b.resize(&config, 4, CREATE).unwrap();
        assert_eq!(b.as_slice(), &[7, 8, 0, 0]);
    }

    #[test]
    fn failed_resize_leaves_block_intact() {
        let config = AllocatorConfig::new().with_max_block_bytes(4);
        let mut b = Block::concat(&config, &[&[1u16, 2]], CREATE).unwrap();
        let append = Caption::new(ArrayKind::Vector, Operation::Append);
        assert!(b.resize(&config, 3, append).is_err());
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn empty_block_has_no_storage() {
        let b = Block::<f32>::empty();
        assert!(b.is_empty());
        assert_eq!(b.memory_bytes(), 0);
        b.free();
    }
}
