//! Runtime descriptors for the storage encodings.

use std::fmt;

/// One of the eleven storage encodings values can be persisted in.
///
/// The compile-time counterpart of each variant is a [`StorageCodec`]
/// type in [`crate::codec`]; this enum exists for diagnostics and for
/// callers that select an encoding by name.
///
/// [`StorageCodec`]: crate::codec::StorageCodec
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Native-width signed integer, 64 bits on the wire.
    Integer,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// 32-bit IEEE float.
    R32,
    /// 64-bit IEEE float.
    R64,
    /// Complex number with 32-bit parts.
    C64,
    /// Complex number with 64-bit parts.
    C128,
}

impl Storage {
    /// Every encoding, in declaration order.
    pub const ALL: [Storage; 11] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::Integer,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::R32,
        Self::R64,
        Self::C64,
        Self::C128,
    ];

    /// Short lowercase name, e.g. `"r64"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::Integer => "integer",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::R32 => "r32",
            Self::R64 => "r64",
            Self::C64 => "c64",
            Self::C128 => "c128",
        }
    }

    /// Bytes per value in the binary format.
    pub const fn wire_width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::R32 => 4,
            Self::Integer | Self::R64 | Self::C64 => 8,
            Self::C128 => 16,
        }
    }

    /// Whether values carry a real and an imaginary part.
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::C64 | Self::C128)
    }

    /// Look up an encoding by its [`name`](Storage::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
