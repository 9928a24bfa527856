//! Stream Processor: the per-sample learn/predict/score loop
//!
//! ## Overview
//!
//! A [`StreamProcessor`] owns every piece of mutable state for one input stream
//! and advances it one raw sample at a time:
//!
//! ```text
//! observe(raw)
//!   │
//!   ├─ non-finite? ──────────────────────────────► Rejected
//!   ├─ FilterPipeline.process ── absorbed ───────► Absorbed
//!   │
//!   ├─ DistributionStats.record(value)
//!   ├─ AccuracyTracker.check(value, pending)      (once the window has filled)
//!   ├─ SlidingWindow.push(value)
//!   └─ window full?
//!        └─ trie.record(window)
//!           pending = trie.predict_from(window minus oldest)
//!                                                 ► Processed { value, outcome }
//! ```
//!
//! Each call runs to completion; no state is shared between processors. To
//! process several streams, build one processor per stream. A processor is
//! `Send`, but callers sharing one across threads must serialize access.
//!
//! ## Usage
//!
//! ```rust
//! use seqguard_core::StreamProcessor;
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
//! // [1,2] has always been followed by 3
//! let prediction = processor.current_prediction();
//! assert_eq!(prediction.value, Some(3.0));
//! assert_eq!(prediction.relative_confidence, 1.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    accuracy::{AccuracyCounters, AccuracyTracker, Outcome},
    config::{FilterConfig, ProcessorConfig},
    constants::{DEFAULT_WINDOW_CAPACITY, MIN_WINDOW_CAPACITY},
    errors::{ConfigError, ConfigResult},
    pipeline::{FilterPipeline, FilterPipelineBuilder},
    prediction::Prediction,
    sample::{self, Sample},
    stats::{DistributionSnapshot, DistributionStats, ProcessingStats},
    traits::{FilterStage, SampleSource},
    trie::SequenceTrie,
    window::SlidingWindow,
};

/// What `observe` did with a raw sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// Sample was not finite; nothing changed besides the rejection count
    Rejected,
    /// A filter stage swallowed the sample; nothing reached the engine
    Absorbed,
    /// A filtered value went through the engine
    Processed {
        /// Filtered value that entered the window
        value: Sample,
        /// Result of scoring the previous prediction against `value`;
        /// `None` until the window has filled once
        outcome: Option<Outcome>,
    },
}

impl Observation {
    /// Filtered value, if one was produced
    pub fn value(&self) -> Option<Sample> {
        match self {
            Self::Processed { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Scoring outcome, if the previous prediction was scored
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Processed { outcome, .. } => *outcome,
            _ => None,
        }
    }
}

/// Point-in-time view of a processor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcessorSnapshot {
    /// Pending prediction for the next filtered value
    pub prediction: Prediction,
    /// Accuracy counters
    pub accuracy: AccuracyCounters,
    /// Distribution of filtered values
    pub distribution: DistributionSnapshot,
    /// Raw sample counters
    pub processing: ProcessingStats,
}

/// Online sequence learner and next-value predictor for one stream
pub struct StreamProcessor {
    pipeline: FilterPipeline,
    window: SlidingWindow,
    trie: SequenceTrie,
    tracker: AccuracyTracker,
    distribution: DistributionStats,
    /// Prediction for the next filtered value; "none" until the window fills
    pending: Prediction,
    stats: ProcessingStats,
}

impl StreamProcessor {
    /// Create a new processor builder
    pub fn builder() -> StreamProcessorBuilder {
        StreamProcessorBuilder::new()
    }

    /// Build a processor from validated configuration
    pub fn from_config(config: &ProcessorConfig) -> ConfigResult<Self> {
        config.validate()?;
        let pipeline = FilterPipeline::from_configs(&config.filter_chain)?;
        Self::with_pipeline(config.window_capacity, pipeline)
    }

    /// Build a processor around an existing pipeline
    pub fn with_pipeline(window_capacity: usize, pipeline: FilterPipeline) -> ConfigResult<Self> {
        if window_capacity < MIN_WINDOW_CAPACITY {
            return Err(ConfigError::WindowTooSmall {
                capacity: window_capacity,
                min: MIN_WINDOW_CAPACITY,
            });
        }

        log_debug!(
            "stream processor ready: window_capacity={}, stages={}",
            window_capacity,
            pipeline.len()
        );

        Ok(Self {
            pipeline,
            window: SlidingWindow::new(window_capacity)?,
            trie: SequenceTrie::new(),
            tracker: AccuracyTracker::new(),
            distribution: DistributionStats::new(),
            pending: Prediction::default(),
            stats: ProcessingStats::default(),
        })
    }

    /// Process one raw sample
    ///
    /// Total for every input: non-finite samples are rejected and counted,
    /// everything else is absorbed by a filter stage or processed.
    pub fn observe(&mut self, raw: Sample) -> Observation {
        self.stats.samples_observed += 1;

        if !sample::is_valid(raw) {
            self.stats.samples_rejected += 1;
            log_warn!("rejected non-finite sample {}", raw);
            return Observation::Rejected;
        }

        let value = match self.pipeline.process(raw) {
            Some(value) => value,
            None => {
                self.stats.samples_absorbed += 1;
                return Observation::Absorbed;
            }
        };

        // A stage can still overflow (huge averages) or misbehave (custom map)
        if !sample::is_valid(value) {
            self.stats.samples_rejected += 1;
            log_warn!("filter chain produced non-finite value {} from {}", value, raw);
            return Observation::Rejected;
        }

        self.stats.values_emitted += 1;
        self.distribution.record(value);

        // A full window means a prediction was made on the previous step
        let outcome = if self.window.is_full() {
            let outcome = self.tracker.check(value, &self.pending);
            if outcome == Outcome::Incorrect {
                log_debug!("pattern break: expected {}, got {}", self.pending, value);
            }
            Some(outcome)
        } else {
            None
        };

        self.window.push(value);

        if self.window.is_full() {
            self.pending = self.trie.record_and_predict(&self.window);
            self.stats.predictions_made += 1;
            log_trace!("next: {}", self.pending);
        }

        Observation::Processed { value, outcome }
    }

    /// Observe every sample in order; returns how many were processed
    pub fn observe_all<I>(&mut self, samples: I) -> usize
    where
        I: IntoIterator<Item = Sample>,
    {
        samples
            .into_iter()
            .filter(|&s| matches!(self.observe(s), Observation::Processed { .. }))
            .count()
    }

    /// Drain up to `max_samples` from a source
    ///
    /// Stops early when the source would block or reports end of stream.
    /// Returns the number of samples pulled; other source errors propagate.
    pub fn process_source<S: SampleSource>(
        &mut self,
        source: &mut S,
        max_samples: usize,
    ) -> Result<usize, S::Error> {
        let mut pulled = 0;

        for _ in 0..max_samples {
            match source.poll_next() {
                Ok(sample) => {
                    self.observe(sample);
                    pulled += 1;
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) if S::is_end_of_stream(&e) => break,
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }

        Ok(pulled)
    }

    /// Prediction for the next filtered value
    pub fn current_prediction(&self) -> &Prediction {
        &self.pending
    }

    /// Accuracy counters so far
    pub fn current_accuracy(&self) -> AccuracyCounters {
        self.tracker.counters()
    }

    /// Distribution of filtered values so far
    pub fn current_distribution(&self) -> &DistributionStats {
        &self.distribution
    }

    /// Raw sample counters
    pub fn processing_stats(&self) -> ProcessingStats {
        self.stats
    }

    /// Owned copy of every query at once
    pub fn snapshot(&self) -> ProcessorSnapshot {
        ProcessorSnapshot {
            prediction: self.pending.clone(),
            accuracy: self.current_accuracy(),
            distribution: self.distribution.snapshot(),
            processing: self.stats,
        }
    }

    /// Sliding window over filtered values
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// Learned sequences
    pub fn trie(&self) -> &SequenceTrie {
        &self.trie
    }

    /// Filter chain
    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    /// Return to the initial state, keeping the configuration
    pub fn reset(&mut self) {
        self.pipeline.reset();
        self.window.clear();
        self.trie.clear();
        self.tracker.reset();
        self.distribution.clear();
        self.pending = Prediction::default();
        self.stats = ProcessingStats::default();
    }
}

impl core::fmt::Debug for StreamProcessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamProcessor")
            .field("pipeline", &self.pipeline)
            .field("window", &self.window)
            .field("sequences", &self.trie.sequence_count())
            .field("pending", &self.pending)
            .field("accuracy", &self.tracker.counters())
            .finish()
    }
}

/// Builder for stream processors
///
/// Stage parameters are checked as they are added; the first invalid one is
/// reported by [`StreamProcessorBuilder::build`].
///
/// ```rust
/// use seqguard_core::{ConfigError, StreamProcessor};
///
/// let err = StreamProcessor::builder()
///     .window_capacity(4)
///     .average(0)
///     .build()
///     .unwrap_err();
/// assert_eq!(err, ConfigError::InvalidPeriod { period: 0 });
/// ```
pub struct StreamProcessorBuilder {
    window_capacity: usize,
    pipeline: FilterPipelineBuilder,
    error: Option<ConfigError>,
}

impl StreamProcessorBuilder {
    /// Builder with the default capacity and no filters
    pub fn new() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            pipeline: FilterPipelineBuilder::new(),
            error: None,
        }
    }

    /// Set the window capacity (sequence length studied)
    pub fn window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    /// Append any filter stage
    pub fn add_stage<S: FilterStage + 'static>(mut self, stage: S) -> Self {
        self.pipeline = self.pipeline.add_stage(stage);
        self
    }

    /// Append a built-in stage from its configuration
    pub fn filter(mut self, config: FilterConfig) -> Self {
        match config.build() {
            Ok(stage) => self.pipeline = self.pipeline.add_boxed(stage),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Append an averaging stage
    pub fn average(self, period: u32) -> Self {
        self.filter(FilterConfig::Average { period })
    }

    /// Append a bucketing stage
    pub fn bucket(self, granularity: f64) -> Self {
        self.filter(FilterConfig::Bucket { granularity })
    }

    /// Build the processor
    pub fn build(self) -> ConfigResult<StreamProcessor> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let pipeline = self.pipeline.build()?;
        StreamProcessor::with_pipeline(self.window_capacity, pipeline)
    }
}

impl Default for StreamProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
