//! Allocation context: configuration plus live-allocation accounting.

use ranged_core::{ArrayError, Element, IndexRange, LiveCounter};

use crate::config::AllocatorConfig;
use crate::matrix::BoundedMatrix;
use crate::tensor::BoundedTensor3;
use crate::vector::BoundedVector;

/// Entry point for creating containers.
///
/// A context pairs an [`AllocatorConfig`] with the [`LiveCounter`] that
/// every non-empty container built from it registers with. Contexts are
/// cheap to clone; clones share the counter. Containers keep a clone of
/// the context they were built from, so growth and copies obey the same
/// limits and are counted in the same place.
///
/// # Examples
///
/// ```
/// use ranged_arena::ArrayContext;
/// use ranged_core::IndexRange;
///
/// let ctx = ArrayContext::new();
/// let mut v = ctx.vector::<f64>(IndexRange::new(-2, 2)).unwrap();
/// v[-2] = 1.5;
/// assert_eq!(ctx.live_count(), 1);
/// drop(v);
/// assert_eq!(ctx.live_count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArrayContext {
    config: AllocatorConfig,
    live: LiveCounter,
}

impl ArrayContext {
    /// A context with default config and its own counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with default config counting into the process-wide counter.
    pub fn process() -> Self {
        Self {
            config: AllocatorConfig::new(),
            live: LiveCounter::process(),
        }
    }

    /// A context with the given config and its own counter.
    pub fn with_config(config: AllocatorConfig) -> Self {
        Self {
            config,
            live: LiveCounter::new(),
        }
    }

    /// Replace the counter this context registers containers with.
    pub fn with_counter(mut self, live: LiveCounter) -> Self {
        self.live = live;
        self
    }

    /// The allocator configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// The live-allocation counter.
    pub fn counter(&self) -> &LiveCounter {
        &self.live
    }

    /// Number of containers from this context's counter currently alive.
    pub fn live_count(&self) -> isize {
        self.live.get()
    }

    /// Create a zero-initialised vector over `range`.
    pub fn vector<T: Element>(&self, range: IndexRange) -> Result<BoundedVector<T>, ArrayError> {
        BoundedVector::create(self, range)
    }

    /// Create a zero-initialised matrix over `rows x cols`.
    pub fn matrix<T: Element>(
        &self,
        rows: IndexRange,
        cols: IndexRange,
    ) -> Result<BoundedMatrix<T>, ArrayError> {
        BoundedMatrix::create(self, rows, cols)
    }

    /// Create a zero-initialised three-rank tensor over `planes x rows x cols`.
    pub fn tensor3<T: Element>(
        &self,
        planes: IndexRange,
        rows: IndexRange,
        cols: IndexRange,
    ) -> Result<BoundedTensor3<T>, ArrayError> {
        BoundedTensor3::create(self, planes, rows, cols)
    }
}
