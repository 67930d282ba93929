//! Errors raised while building or mutating ranged containers.

use std::error::Error;
use std::fmt;

use smallvec::SmallVec;

use crate::range::IndexRange;

/// The index ranges of a container, outermost dimension first.
pub type Bounds = SmallVec<[IndexRange; 3]>;

/// The logical container an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    /// One-dimensional [`IndexRange`]-addressed vector.
    Vector,
    /// Two-dimensional row-major matrix.
    Matrix,
    /// Three-dimensional plane/row/column tensor.
    Tensor3,
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector => f.write_str("vector"),
            Self::Matrix => f.write_str("matrix"),
            Self::Tensor3 => f.write_str("three-rank tensor"),
        }
    }
}

/// The structural operation that was in progress when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fresh allocation of a container.
    Create,
    /// Allocation of a container holding a copy of another.
    Copy,
    /// Growth of a vector by one trailing element.
    Append,
    /// Growth of a vector by one element at an arbitrary position.
    Insert,
}

/// Errors that can occur during container allocation and mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A raw block request could not be satisfied.
    AllocationFailed {
        /// The container being built.
        kind: ArrayKind,
        /// What was being done to it.
        operation: Operation,
        /// Size of the failed block request.
        bytes: usize,
    },
    /// The element count or byte size of the request overflows `usize`.
    CapacityOverflow {
        /// The container being built.
        kind: ArrayKind,
        /// What was being done to it.
        operation: Operation,
    },
    /// An index or insert position lies outside the permitted range.
    IndexOutOfRange {
        /// The rejected index.
        index: isize,
        /// The range it had to fall in.
        range: IndexRange,
    },
    /// A sub-range reaches outside the container it addresses.
    RangeNotCovered {
        /// The sub-range that was asked for.
        requested: IndexRange,
        /// The range actually available.
        available: IndexRange,
    },
    /// Two containers that must share bounds do not.
    ShapeMismatch {
        /// The kind of both containers.
        kind: ArrayKind,
        /// Bounds of the destination (or left-hand) container.
        expected: Bounds,
        /// Bounds of the source (or right-hand) container.
        found: Bounds,
    },
}

fn write_bounds(f: &mut fmt::Formatter<'_>, bounds: &Bounds) -> fmt::Result {
    for (i, r) in bounds.iter().enumerate() {
        if i > 0 {
            f.write_str(" x ")?;
        }
        write!(f, "{r}")?;
    }
    Ok(())
}

fn write_caption(f: &mut fmt::Formatter<'_>, kind: ArrayKind, operation: Operation) -> fmt::Result {
    match operation {
        Operation::Create => write!(f, "{kind} not created"),
        Operation::Copy => write!(f, "{kind} not copied"),
        Operation::Append => write!(f, "{kind}: element not appended"),
        Operation::Insert => write!(f, "{kind}: element not inserted"),
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed {
                kind,
                operation,
                bytes,
            } => {
                write_caption(f, *kind, *operation)?;
                write!(f, ": could not allocate {bytes} bytes")
            }
            Self::CapacityOverflow { kind, operation } => {
                write_caption(f, *kind, *operation)?;
                f.write_str(": size overflows the address space")
            }
            Self::IndexOutOfRange { index, range } => {
                write!(f, "index {index} outside {range}")
            }
            Self::RangeNotCovered {
                requested,
                available,
            } => {
                write!(f, "range {requested} not within {available}")
            }
            Self::ShapeMismatch {
                kind,
                expected,
                found,
            } => {
                write!(f, "{kind} bounds mismatch: expected ")?;
                write_bounds(f, expected)?;
                f.write_str(", found ")?;
                write_bounds(f, found)
            }
        }
    }
}

impl Error for ArrayError {}

impl ArrayError {
    /// The container kind this error is captioned with, if any.
    pub fn kind(&self) -> Option<ArrayKind> {
        match self {
            Self::AllocationFailed { kind, .. }
            | Self::CapacityOverflow { kind, .. }
            | Self::ShapeMismatch { kind, .. } => Some(*kind),
            Self::IndexOutOfRange { .. } | Self::RangeNotCovered { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn allocation_failure_names_the_object() {
        let e = ArrayError::AllocationFailed {
            kind: ArrayKind::Tensor3,
            operation: Operation::Create,
            bytes: 96,
        };
        assert_eq!(
            e.to_string(),
            "three-rank tensor not created: could not allocate 96 bytes"
        );
        assert_eq!(e.kind(), Some(ArrayKind::Tensor3));
    }

    #[test]
    fn append_caption() {
        let e = ArrayError::CapacityOverflow {
            kind: ArrayKind::Vector,
            operation: Operation::Append,
        };
        assert!(e.to_string().starts_with("vector: element not appended"));
    }

    #[test]
    fn shape_mismatch_lists_bounds() {
        let e = ArrayError::ShapeMismatch {
            kind: ArrayKind::Matrix,
            expected: smallvec![IndexRange::new(1, 2), IndexRange::new(1, 3)],
            found: smallvec![IndexRange::new(1, 2), IndexRange::new(0, 3)],
        };
        assert_eq!(
            e.to_string(),
            "matrix bounds mismatch: expected [1, 2] x [1, 3], found [1, 2] x [0, 3]"
        );
    }
}
