//! Allocator configuration parameters.

/// Configuration for container allocation.
///
/// Immutable once handed to an [`ArrayContext`](crate::ArrayContext); every
/// container built from that context, and every growth of such a container,
/// obeys the same limits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Largest single block, in bytes, the allocator will request.
    ///
    /// Default: `None` (bounded only by the system allocator). A request
    /// above the ceiling fails with `AllocationFailed` exactly as an
    /// exhausted heap would.
    pub max_block_bytes: Option<usize>,
}

impl AllocatorConfig {
    /// Default block ceiling: unlimited.
    pub const DEFAULT_MAX_BLOCK_BYTES: Option<usize> = None;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            max_block_bytes: Self::DEFAULT_MAX_BLOCK_BYTES,
        }
    }

    /// Set a ceiling on the size of any single block.
    pub fn with_max_block_bytes(mut self, bytes: usize) -> Self {
        self.max_block_bytes = Some(bytes);
        self
    }

    /// Whether a block of `bytes` is within the configured ceiling.
    pub fn permits(&self, bytes: usize) -> bool {
        self.max_block_bytes.is_none_or(|max| bytes <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let config = AllocatorConfig::default();
        assert_eq!(config, AllocatorConfig::new());
        assert!(config.permits(usize::MAX));
    }

    #[test]
    fn ceiling_is_inclusive() {
        let config = AllocatorConfig::new().with_max_block_bytes(64);
        assert!(config.permits(64));
        assert!(!config.permits(65));
    }
}
