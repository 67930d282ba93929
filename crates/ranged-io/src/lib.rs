//! Text and binary persistence of ranged vectors and matrices.
//!
//! Values are persisted in one of eleven storage encodings (8/16/32-bit
//! signed and unsigned integers, a native wide integer, 32/64-bit reals,
//! and 64/128-bit complex numbers). Each encoding is a zero-sized
//! [`StorageCodec`] type; the read and write routines are generic over the
//! codec, so control flow and cleanup are written once.
//!
//! # Formats
//!
//! Binary: fixed-width values in index order (row-major for matrices), no
//! header, no indices. Bounds and encoding travel out of band.
//!
//! Text: one labelled line per element, nested by indentation:
//!
//! ```text
//! v []:
//!     v [1]: 0.5
//!     v [2]: -3
//! m [] []:
//!     m [1]:
//!         m [1] [1]: 7
//! ```
//!
//! Readers take values in index order and use the labels only for error
//! captions. A failed read frees the partially filled container before the
//! error reaches the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binary;
pub mod codec;
pub mod config;
pub mod error;
pub mod matrix;
pub mod storage;
pub mod text;
pub mod vector;

pub use binary::{BinaryReader, BinaryWriter};
pub use codec::{
    ParseFault, StorageCodec, C128, C64, I16, I32, I8, Integer, R32, R64, U16, U32, U8,
};
pub use config::{ByteOrder, PersistConfig};
pub use error::{ElementPath, PersistError, ValueError};
pub use matrix::{read_matrix_binary, read_matrix_text, write_matrix_binary, write_matrix_text};
pub use storage::Storage;
pub use text::{TextReader, TextWriter};
pub use vector::{read_vector_binary, read_vector_text, write_vector_binary, write_vector_text};
