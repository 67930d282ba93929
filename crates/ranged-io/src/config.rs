//! Persistence configuration parameters.

/// Byte order of multi-byte values in the binary format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// Configuration for text and binary persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistConfig {
    /// Byte order of binary values.
    ///
    /// Default: [`ByteOrder::Big`], the order used by the binary object
    /// files this layer reads and writes.
    pub byte_order: ByteOrder,

    /// Spaces per nesting level in the text format.
    ///
    /// Default: 4. Readers ignore indentation entirely.
    pub indent_width: usize,
}

impl PersistConfig {
    /// Default text indentation step.
    pub const DEFAULT_INDENT_WIDTH: usize = 4;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            indent_width: Self::DEFAULT_INDENT_WIDTH,
        }
    }

    /// Use `order` for binary values.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Use `width` spaces per text nesting level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PersistConfig::default();
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.indent_width, 4);
    }

    #[test]
    fn builders_override() {
        let config = PersistConfig::new()
            .with_byte_order(ByteOrder::Little)
            .with_indent_width(2);
        assert_eq!(config.byte_order, ByteOrder::Little);
        assert_eq!(config.indent_width, 2);
    }
}
