//! Ranged: vectors, matrices, and three-rank tensors indexed from arbitrary
//! integer lower bounds, with text and binary persistence.
//!
//! This is the facade crate that re-exports the public API from the
//! sub-crates. For most users, adding `ranged` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ranged::prelude::*;
//!
//! let ctx = ArrayContext::new();
//! let mut v = ctx.vector::<f64>(IndexRange::new(-2, 2)).unwrap();
//! v[-2] = 0.5;
//! v.append().unwrap();
//! assert_eq!(v.range(), IndexRange::new(-2, 3));
//!
//! let mut w = TextWriter::new(Vec::new());
//! write_vector_text::<R64, _>(&v, &mut w, "v").unwrap();
//! let text = w.into_inner();
//!
//! let mut r = TextReader::new(text.as_slice());
//! let back = read_vector_text::<R64, _>(&ctx, v.range(), &mut r, "v").unwrap();
//! assert_eq!(back, v);
//! assert_eq!(ctx.live_count(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ranged-core` | Index ranges, element trait, errors, live counter |
//! | [`arena`] | `ranged-arena` | Allocator context and the three container kinds |
//! | [`persist`] | `ranged-io` | Storage codecs, text and binary readers and writers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Index ranges, the element trait, error types, and the live counter
/// (`ranged-core`).
pub use ranged_core as types;

/// Allocator context and containers (`ranged-arena`).
///
/// [`arena::BoundedVector`] grows by [`append`](arena::BoundedVector::append)
/// and [`insert`](arena::BoundedVector::insert); matrices and tensors have
/// fixed bounds.
pub use ranged_arena as arena;

/// Text and binary persistence (`ranged-io`).
///
/// Every routine is generic over a [`persist::StorageCodec`] such as
/// [`persist::R64`] or [`persist::C128`].
pub use ranged_io as persist;

/// Common imports for typical usage.
///
/// ```rust
/// use ranged::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ranged_core::{ArrayError, Element, IndexRange, LiveCounter};

    // Containers
    pub use ranged_arena::{
        AllocatorConfig, ArrayContext, BoundedMatrix, BoundedTensor3, BoundedVector,
    };

    // Persistence
    pub use ranged_io::{
        read_matrix_binary, read_matrix_text, read_vector_binary, read_vector_text,
        write_matrix_binary, write_matrix_text, write_vector_binary, write_vector_text,
        BinaryReader, BinaryWriter, PersistConfig, PersistError, Storage, StorageCodec,
        TextReader, TextWriter, C128, C64, I16, I32, I8, Integer, R32, R64, U16, U32, U8,
    };
}
