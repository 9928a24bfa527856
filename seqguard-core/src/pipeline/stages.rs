//! Built-in filter stages
//!
//! - [`AveragingStage`]: mean of every `period` inputs (N:1)
//! - [`BucketingStage`]: snap to the nearest multiple of a granularity (1:1)
//! - [`MapStage`]: arbitrary one-to-one transform from a closure (1:1)

use crate::{
    constants::{BUCKET_ROUNDING_POINT, MIN_AVERAGE_PERIOD},
    errors::{ConfigError, ConfigResult},
    sample::Sample,
    traits::FilterStage,
};

// ============================================================================
// AveragingStage - Running mean over fixed-size groups of inputs
// ============================================================================

/// Stage that emits the mean of every `period` consecutive inputs
///
/// The mean is updated online, `mean' = (input + (k-1)*mean) / k`, where `k` is
/// the 1-based count of inputs since the last emission. The stage is ready on
/// exactly every `period`-th input, and emitting starts a fresh group.
///
/// ```rust
/// use seqguard_core::pipeline::AveragingStage;
/// use seqguard_core::traits::FilterStage;
///
/// let mut avg = AveragingStage::new(3).unwrap();
/// let out: Vec<f64> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
///     .iter()
///     .filter_map(|&v| avg.process(v))
///     .collect();
/// assert_eq!(out, vec![2.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct AveragingStage {
    period: u32,
    /// Inputs accepted since the last emission
    count: u32,
    running_average: f64,
}

impl AveragingStage {
    /// Create an averaging stage; `period` must be at least 1
    pub fn new(period: u32) -> ConfigResult<Self> {
        if period < MIN_AVERAGE_PERIOD {
            return Err(ConfigError::InvalidPeriod { period });
        }
        Ok(Self {
            period,
            count: 0,
            running_average: 0.0,
        })
    }

    /// Inputs per emitted value
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Inputs accumulated in the current group
    pub fn pending(&self) -> u32 {
        self.count
    }
}

impl FilterStage for AveragingStage {
    fn accept(&mut self, value: Sample) {
        // A ready value that was never emitted is dropped with its group
        if self.count >= self.period {
            self.count = 0;
        }

        self.count += 1;
        let k = f64::from(self.count);
        self.running_average = (value + (k - 1.0) * self.running_average) / k;
    }

    fn is_ready(&self) -> bool {
        self.count == self.period
    }

    fn emit(&mut self) -> Option<Sample> {
        if !self.is_ready() {
            return None;
        }
        self.count = 0;
        Some(self.running_average)
    }

    fn name(&self) -> &'static str {
        "AveragingStage"
    }

    fn reset(&mut self) {
        self.count = 0;
        self.running_average = 0.0;
    }
}

// ============================================================================
// BucketingStage - Quantize to the nearest multiple of a granularity
// ============================================================================

/// Stage that maps every input to the nearest multiple of `granularity`
///
/// The remainder `input mod granularity` (floored, so always in
/// `[0, granularity)`) rounds down when below half the granularity and up
/// otherwise. An exact half rounds up, toward positive infinity.
///
/// ```rust
/// use seqguard_core::pipeline::BucketingStage;
/// use seqguard_core::traits::FilterStage;
///
/// let mut bucket = BucketingStage::new(10.0).unwrap();
/// assert_eq!(bucket.process(14.0), Some(10.0));
/// assert_eq!(bucket.process(15.0), Some(20.0));
/// assert_eq!(bucket.process(16.0), Some(20.0));
/// ```
#[derive(Debug, Clone)]
pub struct BucketingStage {
    granularity: f64,
    pending: Option<Sample>,
}

impl BucketingStage {
    /// Create a bucketing stage; `granularity` must be finite and positive
    pub fn new(granularity: f64) -> ConfigResult<Self> {
        if !(granularity.is_finite() && granularity > 0.0) {
            return Err(ConfigError::InvalidGranularity { granularity });
        }
        Ok(Self {
            granularity,
            pending: None,
        })
    }

    /// Bucket width
    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    /// Nearest multiple of the granularity
    pub fn bucket(&self, value: Sample) -> Sample {
        let g = self.granularity;
        let steps = libm::floor(value / g);

        // Every bucket is `steps * g`, whichever side the value came from
        let steps = if value - steps * g >= g * BUCKET_ROUNDING_POINT {
            steps + 1.0
        } else {
            steps
        };
        steps * g
    }
}

impl FilterStage for BucketingStage {
    fn accept(&mut self, value: Sample) {
        self.pending = Some(self.bucket(value));
    }

    fn is_ready(&self) -> bool {
        self.pending.is_some()
    }

    fn emit(&mut self) -> Option<Sample> {
        self.pending.take()
    }

    fn name(&self) -> &'static str {
        "BucketingStage"
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}

// ============================================================================
// MapStage - One-to-one transform
// ============================================================================

/// Stage that applies a closure to every input
///
/// ```rust
/// use seqguard_core::pipeline::MapStage;
/// use seqguard_core::traits::FilterStage;
///
/// let mut to_fahrenheit = MapStage::new(|c| c * 9.0 / 5.0 + 32.0);
/// assert_eq!(to_fahrenheit.process(100.0), Some(212.0));
/// ```
pub struct MapStage<F> {
    transform: F,
    pending: Option<Sample>,
    name: &'static str,
}

impl<F> MapStage<F>
where
    F: Fn(Sample) -> Sample + Send,
{
    /// Create a map stage from a closure
    pub fn new(transform: F) -> Self {
        Self {
            transform,
            pending: None,
            name: "MapStage",
        }
    }

    /// Give the stage a name for logs
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl<F> FilterStage for MapStage<F>
where
    F: Fn(Sample) -> Sample + Send,
{
    fn accept(&mut self, value: Sample) {
        self.pending = Some((self.transform)(value));
    }

    fn is_ready(&self) -> bool {
        self.pending.is_some()
    }

    fn emit(&mut self) -> Option<Sample> {
        self.pending.take()
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}
