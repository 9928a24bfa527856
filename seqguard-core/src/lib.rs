//! Core prediction engine for SeqGuard
//!
//! Learns short-term patterns in a stream of numeric samples and predicts the
//! next value online. Each incoming sample is conditioned by an optional filter
//! chain, pushed into a fixed-capacity sliding window, and once the window is
//! full the whole window is recorded in a sequence trie. The prediction for the
//! next value is the most frequent continuation of the window's newest
//! `capacity - 1` values.
//!
//! Key constraints:
//! - One sample in, one bounded step out; no background work
//! - no_std + alloc capable (the trie grows with distinct sequences)
//! - Every raw input is handled; non-finite samples are counted and dropped
//!
//! ```rust
//! use seqguard_core::{Outcome, StreamProcessor};
//!
//! let mut processor = StreamProcessor::builder()
//!     .window_capacity(3)
//!     .build()
//!     .unwrap();
//!
//! for v in [1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0] {
//!     processor.observe(v);
//! }
//!
//! // The pattern holds...
//! assert_eq!(processor.observe(3.0).outcome(), Some(Outcome::Correct));
//!
//! // ...until it doesn't
//! processor.observe(1.0);
//! processor.observe(2.0);
//! assert_eq!(processor.observe(9.0).outcome(), Some(Outcome::Incorrect));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod logging;

pub mod accuracy;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipeline;
pub mod prediction;
pub mod processor;
pub mod sample;
pub mod stats;
pub mod stream;
pub mod traits;
pub mod trie;
pub mod window;

// Public API
pub use accuracy::{AccuracyCounters, AccuracyTracker, Outcome};
pub use config::{FilterConfig, ProcessorConfig};
pub use errors::{ConfigError, ConfigResult, SourceError};
pub use pipeline::{AveragingStage, BucketingStage, FilterPipeline, MapStage};
pub use prediction::Prediction;
pub use processor::{Observation, ProcessorSnapshot, StreamProcessor, StreamProcessorBuilder};
pub use sample::{Sample, SampleKey};
pub use stats::{DistributionSnapshot, DistributionStats, ProcessingStats};
pub use traits::{FilterStage, SampleSource};
pub use trie::SequenceTrie;
pub use window::SlidingWindow;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
