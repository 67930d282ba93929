//! Test utilities for ranged development.
//!
//! Provides sinks and sources that misbehave on cue ([`FailingWriter`],
//! [`TruncatedReader`]) and deterministic value ramps for filling
//! containers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod io;
mod ramps;

pub use io::{FailingWriter, SinkFault, TruncatedReader};
pub use ramps::{complex_ramp, int_ramp, real_ramp};
