//! Index ranges, element traits, and error types for ranged arrays.
//!
//! This is the leaf crate of the workspace. It defines the vocabulary shared
//! by the allocator (`ranged-arena`) and the persistence layer (`ranged-io`):
//! inclusive index ranges that need not start at zero, the [`Element`] trait
//! for values that can live in a container, the [`ArrayError`] taxonomy, and
//! the live-allocation counter used for leak diagnostics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod live;
pub mod range;

pub use element::{slices_same_bits, Element};
pub use error::{ArrayError, ArrayKind, Bounds, Operation};
pub use live::{LiveCounter, LiveToken};
pub use range::{IndexPath, IndexRange};
