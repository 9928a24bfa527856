//! Construction-time configuration
//!
//! A [`ProcessorConfig`] describes everything a processor needs: the window
//! capacity and the ordered filter chain. It is plain data, serializable under the
//! `serde` feature, and checked by [`ProcessorConfig::validate`] before anything is
//! built.
//!
//! With `serde`, filter stages use an internally tagged representation:
//!
//! ```json
//! {
//!   "window_capacity": 4,
//!   "filter_chain": [
//!     { "type": "average", "period": 3 },
//!     { "type": "bucket", "granularity": 10.0 }
//!   ]
//! }
//! ```

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_WINDOW_CAPACITY, MAX_FILTER_STAGES, MIN_AVERAGE_PERIOD, MIN_WINDOW_CAPACITY},
    errors::{ConfigError, ConfigResult},
    pipeline::{AveragingStage, BucketingStage},
    traits::FilterStage,
};

/// Configuration of a single built-in filter stage
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum FilterConfig {
    /// Mean of every `period` inputs
    Average {
        /// Inputs per emitted value, at least 1
        period: u32,
    },
    /// Snap to the nearest multiple of `granularity`
    Bucket {
        /// Bucket width, finite and greater than 0
        granularity: f64,
    },
}

impl FilterConfig {
    /// Check the stage parameters
    pub fn validate(&self) -> ConfigResult<()> {
        match *self {
            Self::Average { period } if period < MIN_AVERAGE_PERIOD => {
                Err(ConfigError::InvalidPeriod { period })
            }
            Self::Bucket { granularity } if !(granularity.is_finite() && granularity > 0.0) => {
                Err(ConfigError::InvalidGranularity { granularity })
            }
            _ => Ok(()),
        }
    }

    /// Build the stage this config describes
    pub fn build(&self) -> ConfigResult<Box<dyn FilterStage>> {
        Ok(match *self {
            Self::Average { period } => Box::new(AveragingStage::new(period)?),
            Self::Bucket { granularity } => Box::new(BucketingStage::new(granularity)?),
        })
    }
}

/// Configuration of a stream processor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcessorConfig {
    /// Length of the sequences studied, at least 2
    pub window_capacity: usize,
    /// Filter stages, applied in order; empty passes raw values through
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter_chain: Vec<FilterConfig>,
}

impl ProcessorConfig {
    /// Config with the given capacity and no filters
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window_capacity,
            filter_chain: Vec::new(),
        }
    }

    /// Append a filter stage
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter_chain.push(filter);
        self
    }

    /// Check every constraint
    ///
    /// Reports the first violation: window capacity, then chain length, then
    /// each stage in order.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window_capacity < MIN_WINDOW_CAPACITY {
            return Err(ConfigError::WindowTooSmall {
                capacity: self.window_capacity,
                min: MIN_WINDOW_CAPACITY,
            });
        }
        if self.filter_chain.len() > MAX_FILTER_STAGES {
            return Err(ConfigError::TooManyStages {
                max: MAX_FILTER_STAGES,
            });
        }
        self.filter_chain.iter().try_for_each(FilterConfig::validate)
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ProcessorConfig::default();
        assert_eq!(config.window_capacity, DEFAULT_WINDOW_CAPACITY);
        assert!(config.filter_chain.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn capacity_below_two_rejected() {
        for capacity in [0, 1] {
            assert_eq!(
                ProcessorConfig::new(capacity).validate(),
                Err(ConfigError::WindowTooSmall { capacity, min: 2 })
            );
        }
        assert!(ProcessorConfig::new(2).validate().is_ok());
    }

    #[test]
    fn stage_errors_surface() {
        let config = ProcessorConfig::new(3)
            .with_filter(FilterConfig::Bucket { granularity: 1.0 })
            .with_filter(FilterConfig::Average { period: 0 });
        assert_eq!(config.validate(), Err(ConfigError::InvalidPeriod { period: 0 }));

        let config = ProcessorConfig::new(3).with_filter(FilterConfig::Bucket { granularity: -3.0 });
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidGranularity { granularity: -3.0 })
        );
    }

    #[test]
    fn long_chain_rejected() {
        let mut config = ProcessorConfig::new(3);
        for _ in 0..=MAX_FILTER_STAGES {
            config = config.with_filter(FilterConfig::Average { period: 1 });
        }
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyStages { max: MAX_FILTER_STAGES })
        );
    }

    #[test]
    fn build_produces_named_stage() {
        let stage = FilterConfig::Average { period: 3 }.build().unwrap();
        assert_eq!(stage.name(), "AveragingStage");
        let stage = FilterConfig::Bucket { granularity: 2.0 }.build().unwrap();
        assert_eq!(stage.name(), "BucketingStage");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_tagged_filters() {
        let json = r#"{
            "window_capacity": 4,
            "filter_chain": [
                { "type": "average", "period": 3 },
                { "type": "bucket", "granularity": 10.0 }
            ]
        }"#;

        let config: ProcessorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            ProcessorConfig::new(4)
                .with_filter(FilterConfig::Average { period: 3 })
                .with_filter(FilterConfig::Bucket { granularity: 10.0 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_chain_defaults_to_empty() {
        let config: ProcessorConfig = serde_json::from_str(r#"{ "window_capacity": 2 }"#).unwrap();
        assert!(config.filter_chain.is_empty());
    }
}
