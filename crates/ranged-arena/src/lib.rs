//! Vectors, matrices, and tensors over arbitrary integer index ranges.
//!
//! Every container is addressed by raw indices from inclusive ranges such
//! as `[-3, 7]` or `[1, n]`, and stores its cells in one contiguous,
//! row-major block. Offsets from the lower bounds are computed at access
//! time, so no pointer ever lies outside its allocation.
//!
//! # Architecture
//!
//! ```text
//! ArrayContext (allocator config + live counter)
//! ├── BoundedVector<T>   [lo, hi]                     append / insert
//! ├── BoundedMatrix<T>   [row1, row2] x [col1, col2]  copy / equal
//! └── BoundedTensor3<T>  planes x rows x cols
//!       each owns: Block<T> (one contiguous cell run) + LiveToken
//! ```
//!
//! # Failure model
//!
//! Block requests that cannot be satisfied surface as
//! [`ArrayError::AllocationFailed`](ranged_core::ArrayError::AllocationFailed),
//! captioned with the container kind and the operation in progress. A failed
//! request never leaves a half-built container registered with the live
//! counter. Empty ranges are not errors: they yield containers that own no
//! storage and are not counted.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod config;
pub mod context;
pub mod matrix;
pub mod tensor;
pub mod vector;

pub use block::{Block, Caption};
pub use config::AllocatorConfig;
pub use context::ArrayContext;
pub use matrix::BoundedMatrix;
pub use tensor::BoundedTensor3;
pub use vector::BoundedVector;
