//! Filter Stage Trait
//!
//! A filter stage conditions the raw stream before it reaches the prediction
//! engine. Stages form an ordered chain (see [`crate::pipeline::FilterPipeline`]):
//!
//! ```text
//! raw → [Stage 1] → [Stage 2] → ... → [Stage N] → filtered value
//!         ↓ not ready                    ↓ not ready
//!       (absorbed)                     (absorbed)
//! ```
//!
//! Each stage can:
//! - Transform values (1:1, always ready)
//! - Aggregate values (N:1, ready every N-th input)
//!
//! A stage that is not ready after `accept` absorbs the input. That is normal
//! operation, not an error: the step simply produces no filtered value.
//!
//! ## Contract
//!
//! 1. `accept` is called exactly once per input delivered to the stage
//! 2. `is_ready` may be called any number of times and must not change state
//! 3. `emit` is only called when `is_ready` returned `true`, and hands the value
//!    over: after `emit` the stage starts accumulating afresh
//!
//! ## Example: Clamping Stage
//!
//! ```rust
//! use seqguard_core::traits::FilterStage;
//!
//! struct Clamp {
//!     lo: f64,
//!     hi: f64,
//!     pending: Option<f64>,
//! }
//!
//! impl FilterStage for Clamp {
//!     fn accept(&mut self, value: f64) {
//!         self.pending = Some(value.clamp(self.lo, self.hi));
//!     }
//!
//!     fn is_ready(&self) -> bool {
//!         self.pending.is_some()
//!     }
//!
//!     fn emit(&mut self) -> Option<f64> {
//!         self.pending.take()
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "Clamp"
//!     }
//! }
//!
//! let mut clamp = Clamp { lo: 0.0, hi: 10.0, pending: None };
//! assert_eq!(clamp.process(42.0), Some(10.0));
//! ```

use crate::sample::Sample;

/// Trait for filter pipeline stages
///
/// Stages own their accumulator state exclusively. They are `Send` so a
/// processor can be moved to another thread, but never shared.
pub trait FilterStage: Send {
    /// Deliver one input value to the stage
    fn accept(&mut self, value: Sample);

    /// Whether a conditioned value is ready to be emitted
    fn is_ready(&self) -> bool;

    /// Take the conditioned value
    ///
    /// Returns `None` if the stage was not ready.
    fn emit(&mut self) -> Option<Sample>;

    /// Get stage name for debugging
    fn name(&self) -> &'static str;

    /// Accept a value and emit immediately if ready
    ///
    /// This is what the pipeline calls for every stage in the chain.
    fn process(&mut self, value: Sample) -> Option<Sample> {
        self.accept(value);
        if self.is_ready() {
            self.emit()
        } else {
            None
        }
    }

    /// Reset stage state
    ///
    /// Clears any accumulated data and returns to the freshly constructed state.
    /// Configuration (period, granularity) is kept.
    fn reset(&mut self) {}
}
