//! Fixed-width binary value streams.
//!
//! [`BinaryWriter`] and [`BinaryReader`] wrap any `Write`/`Read` and encode
//! primitive values in the configured [`ByteOrder`]. There is no framing:
//! a stream is just values back to back.

use std::io::{self, Read, Write};

use crate::config::{ByteOrder, PersistConfig};
use crate::error::ValueError;

/// Writes fixed-width values to a byte sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production code
/// can use `BufWriter<File>`.
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    sink: W,
    order: ByteOrder,
}

impl<W: Write> BinaryWriter<W> {
    /// Wrap `sink` using the default byte order.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, &PersistConfig::default())
    }

    /// Wrap `sink` using the byte order from `config`.
    pub fn with_config(sink: W, config: &PersistConfig) -> Self {
        Self {
            sink,
            order: config.byte_order,
        }
    }

    /// The byte order values are written in.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Reads fixed-width values from a byte source.
#[derive(Debug)]
pub struct BinaryReader<R: Read> {
    source: R,
    order: ByteOrder,
}

impl<R: Read> BinaryReader<R> {
    /// Wrap `source` using the default byte order.
    pub fn new(source: R) -> Self {
        Self::with_config(source, &PersistConfig::default())
    }

    /// Wrap `source` using the byte order from `config`.
    pub fn with_config(source: R, config: &PersistConfig) -> Self {
        Self {
            source,
            order: config.byte_order,
        }
    }

    /// The byte order values are read in.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Consume the reader and return the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

macro_rules! primitive_io {
    ($($t:ty => $write:ident, $read:ident;)*) => {
        impl<W: Write> BinaryWriter<W> {
            $(
                #[doc = concat!("Write one `", stringify!($t), "`.")]
                pub fn $write(&mut self, v: $t) -> io::Result<()> {
                    let bytes = match self.order {
                        ByteOrder::Big => v.to_be_bytes(),
                        ByteOrder::Little => v.to_le_bytes(),
                    };
                    self.sink.write_all(&bytes)
                }
            )*
        }

        impl<R: Read> BinaryReader<R> {
            $(
                #[doc = concat!("Read one `", stringify!($t), "`.")]
                pub fn $read(&mut self) -> Result<$t, ValueError> {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    self.source.read_exact(&mut buf)?;
                    Ok(match self.order {
                        ByteOrder::Big => <$t>::from_be_bytes(buf),
                        ByteOrder::Little => <$t>::from_le_bytes(buf),
                    })
                }
            )*
        }
    };
}

primitive_io! {
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}
