//! Constants for SeqGuard Core
//!
//! Limits and defaults shared by the pipeline, the window and the processor.
//! Use these instead of magic numbers.

/// Maximum number of stages in a filter pipeline
///
/// Stages live in a `heapless::Vec`, so the chain has a fixed upper bound. Real
/// chains are one to three stages long.
pub const MAX_FILTER_STAGES: usize = 16;

/// Smallest window capacity the processor accepts
///
/// Prediction looks up the window minus its oldest value; with a single slot that
/// prefix is empty and every prediction would come from the root.
pub const MIN_WINDOW_CAPACITY: usize = 2;

/// Window capacity used when none is configured
pub const DEFAULT_WINDOW_CAPACITY: usize = 4;

/// Smallest averaging period
pub const MIN_AVERAGE_PERIOD: u32 = 1;

/// Fraction of the granularity at which bucketing rounds up
pub const BUCKET_ROUNDING_POINT: f64 = 0.5;

/// Maximum number of sequence values rendered in a prediction label
pub const MAX_LABEL_VALUES: usize = 32;
