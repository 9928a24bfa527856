//! Instrumentation over the filtered stream
//!
//! Two read-only views, neither of which feeds back into prediction:
//!
//! - [`DistributionStats`]: count, min, max and per-value frequencies of the
//!   filtered values, plus richness (distinct / total).
//! - [`ProcessingStats`]: how raw samples fared on their way through the
//!   processor.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sample::{Sample, SampleKey};

/// Distribution of filtered values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionStats {
    count: u64,
    min: Option<Sample>,
    max: Option<Sample>,
    sum: f64,
    /// Occurrences per distinct value, ordered numerically
    frequencies: BTreeMap<SampleKey, u64>,
}

impl DistributionStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one filtered value
    pub fn record(&mut self, value: Sample) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        *self.frequencies.entry(SampleKey::new(value)).or_insert(0) += 1;
    }

    /// Number of values recorded
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Smallest value seen
    pub fn min(&self) -> Option<Sample> {
        self.min
    }

    /// Largest value seen
    pub fn max(&self) -> Option<Sample> {
        self.max
    }

    /// Arithmetic mean of all values
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// Number of distinct values
    pub fn distinct(&self) -> usize {
        self.frequencies.len()
    }

    /// Times `value` was seen
    pub fn frequency(&self, value: Sample) -> u64 {
        self.frequencies
            .get(&SampleKey::new(value))
            .copied()
            .unwrap_or(0)
    }

    /// Distinct values over total values, in `(0, 1]`
    ///
    /// Close to 1 means nearly every value is new; close to 0 means the stream
    /// keeps revisiting a few values. `None` before the first value.
    pub fn richness(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.distinct() as f64 / self.count as f64)
        }
    }

    /// Per-value counts in ascending value order
    pub fn frequencies(&self) -> impl Iterator<Item = (Sample, u64)> + '_ {
        self.frequencies.iter().map(|(k, &n)| (k.value(), n))
    }

    /// Owned snapshot suitable for reporting
    pub fn snapshot(&self) -> DistributionSnapshot {
        DistributionSnapshot {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: self.mean(),
            distinct: self.distinct(),
            richness: self.richness(),
            frequencies: self.frequencies().collect(),
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Point-in-time copy of [`DistributionStats`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistributionSnapshot {
    /// Number of values
    pub count: u64,
    /// Smallest value
    pub min: Option<Sample>,
    /// Largest value
    pub max: Option<Sample>,
    /// Mean value
    pub mean: Option<f64>,
    /// Distinct values
    pub distinct: usize,
    /// Distinct over total
    pub richness: Option<f64>,
    /// `(value, count)` pairs in ascending value order
    pub frequencies: Vec<(Sample, u64)>,
}

/// Statistics for raw sample processing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcessingStats {
    /// Raw samples passed to `observe`
    pub samples_observed: u64,
    /// Raw samples rejected as non-finite
    pub samples_rejected: u64,
    /// Raw samples swallowed by a filter stage that was not ready
    pub samples_absorbed: u64,
    /// Filtered values that reached the engine
    pub values_emitted: u64,
    /// Predictions computed (one per step with a full window)
    pub predictions_made: u64,
}
