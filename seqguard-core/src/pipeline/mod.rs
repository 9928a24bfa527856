//! Filter Pipeline with Composable Conditioning Stages
//!
//! ## Overview
//!
//! Raw samples are conditioned before the prediction engine sees them. The
//! pipeline is an ordered chain of [`FilterStage`]s; each raw value is pushed
//! through the whole chain synchronously, and a stage that is not ready absorbs
//! the value so nothing comes out of that step.
//!
//! ```text
//! raw → Averaging(3) → Bucketing(10) → filtered
//!  1  →   (absorb)
//!  2  →   (absorb)
//!  3  →      2       →      0        →    0
//! ```
//!
//! ## Module Organization
//!
//! - Core types (this file)
//! - `stages` - Built-in stages (averaging, bucketing, map)
//! - `builder` - Pipeline and builder
//!
//! ## Usage
//!
//! ```rust
//! use seqguard_core::pipeline::{FilterPipeline, AveragingStage, BucketingStage};
//!
//! let mut pipeline = FilterPipeline::builder()
//!     .add_stage(AveragingStage::new(2).unwrap())
//!     .add_stage(BucketingStage::new(10.0).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(pipeline.process(12.0), None);
//! assert_eq!(pipeline.process(20.0), Some(20.0));
//! ```

pub mod builder;
pub mod stages;

pub use builder::{FilterPipeline, FilterPipelineBuilder};
pub use stages::{AveragingStage, BucketingStage, MapStage};

pub use crate::constants::MAX_FILTER_STAGES;
pub use crate::traits::FilterStage;

/// Per-stage counters for monitoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMetrics {
    /// Inputs delivered to each stage
    pub accepted: [u64; MAX_FILTER_STAGES],
    /// Outputs produced by each stage
    pub emitted: [u64; MAX_FILTER_STAGES],
}

impl StageMetrics {
    /// Zeroed metrics
    pub const fn new() -> Self {
        Self {
            accepted: [0; MAX_FILTER_STAGES],
            emitted: [0; MAX_FILTER_STAGES],
        }
    }

    /// Inputs stage `idx` swallowed without emitting
    pub fn absorbed(&self, idx: usize) -> u64 {
        match (self.accepted.get(idx), self.emitted.get(idx)) {
            (Some(a), Some(e)) => a.saturating_sub(*e),
            _ => 0,
        }
    }
}

impl Default for StageMetrics {
    fn default() -> Self {
        Self::new()
    }
}
