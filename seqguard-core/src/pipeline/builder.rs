//! Filter pipeline and its builder

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use heapless::Vec;

use crate::{
    config::FilterConfig,
    constants::MAX_FILTER_STAGES,
    errors::{ConfigError, ConfigResult},
    sample::Sample,
    traits::FilterStage,
};

use super::StageMetrics;

/// Ordered chain of filter stages
///
/// ## Design Goals
///
/// 1. **Fixed Shape**: The chain is fixed at construction time
/// 2. **Composable**: Built-in and custom stages mix freely
/// 3. **Synchronous**: One raw value is pushed through the whole chain inside a
///    single call; nothing is carried between calls except stage state
/// 4. **Observable**: Per-stage accepted/emitted counters
///
/// An empty pipeline passes every value through unchanged.
pub struct FilterPipeline {
    /// Processing stages, first to last
    stages: Vec<Box<dyn FilterStage>, MAX_FILTER_STAGES>,
    /// Per-stage counters
    metrics: StageMetrics,
}

impl FilterPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> FilterPipelineBuilder {
        FilterPipelineBuilder::new()
    }

    /// Pipeline with no stages
    pub fn passthrough() -> Self {
        Self {
            stages: Vec::new(),
            metrics: StageMetrics::new(),
        }
    }

    /// Build the chain described by `configs`, in order
    pub fn from_configs(configs: &[FilterConfig]) -> ConfigResult<Self> {
        let mut builder = Self::builder();
        for config in configs {
            builder = builder.add_boxed(config.build()?);
        }
        builder.build()
    }

    /// Push one raw value through every stage
    ///
    /// Returns the conditioned value, or `None` when some stage absorbed the
    /// input. Stages after the absorbing one do not see the value at all.
    pub fn process(&mut self, raw: Sample) -> Option<Sample> {
        let mut value = raw;

        for (stage_idx, stage) in self.stages.iter_mut().enumerate() {
            self.metrics.accepted[stage_idx] += 1;

            match stage.process(value) {
                Some(out) => {
                    self.metrics.emitted[stage_idx] += 1;
                    value = out;
                }
                None => {
                    log_trace!("{} absorbed {}", stage.name(), value);
                    return None;
                }
            }
        }

        Some(value)
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names, first to last
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    /// Get pipeline metrics
    pub fn metrics(&self) -> &StageMetrics {
        &self.metrics
    }

    /// Reset all stages and metrics
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.metrics = StageMetrics::new();
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::passthrough()
    }
}

impl core::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("stages", &self.stages.iter().map(|s| s.name()).collect::<Vec<_, MAX_FILTER_STAGES>>())
            .finish()
    }
}

/// Builder for filter pipelines
pub struct FilterPipelineBuilder {
    stages: Vec<Box<dyn FilterStage>, MAX_FILTER_STAGES>,
    overflowed: bool,
}

impl FilterPipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            overflowed: false,
        }
    }

    /// Add a processing stage
    pub fn add_stage<S: FilterStage + 'static>(self, stage: S) -> Self {
        self.add_boxed(Box::new(stage))
    }

    /// Add an already boxed stage
    pub fn add_boxed(mut self, stage: Box<dyn FilterStage>) -> Self {
        if self.stages.push(stage).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Number of stages added so far
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if no stages were added
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Build the pipeline
    ///
    /// Fails if more than [`MAX_FILTER_STAGES`] stages were added.
    pub fn build(self) -> ConfigResult<FilterPipeline> {
        if self.overflowed {
            return Err(ConfigError::TooManyStages {
                max: MAX_FILTER_STAGES,
            });
        }
        Ok(FilterPipeline {
            stages: self.stages,
            metrics: StageMetrics::new(),
        })
    }
}

impl Default for FilterPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
