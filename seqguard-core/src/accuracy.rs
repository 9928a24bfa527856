//! Prediction scoring
//!
//! Each filtered sample is compared against the prediction made one step
//! earlier. The counters are the signal an external alerting policy consumes: a
//! run of `incorrect` after a long run of `correct` means the stream just left its
//! learned pattern.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prediction::Prediction;
use crate::sample::Sample;

/// Result of scoring one prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// Prediction matched the observed value
    Correct,
    /// A value was predicted and a different one arrived
    Incorrect,
    /// Nothing was predicted
    NoPrediction,
}

/// Running accuracy counters
///
/// All counts only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccuracyCounters {
    /// Predictions that matched
    pub correct: u64,
    /// Predictions that missed
    pub incorrect: u64,
    /// Steps with no prediction to check
    pub no_prediction: u64,
}

impl AccuracyCounters {
    /// Total checks performed
    pub fn total(&self) -> u64 {
        self.correct + self.incorrect + self.no_prediction
    }

    /// Checks that had a value to compare
    pub fn scored(&self) -> u64 {
        self.correct + self.incorrect
    }

    /// Fraction of scored predictions that were correct
    ///
    /// `None` until at least one prediction has been scored.
    pub fn accuracy(&self) -> Option<f64> {
        match self.scored() {
            0 => None,
            scored => Some(self.correct as f64 / scored as f64),
        }
    }

    /// Fraction of checks that had a prediction at all
    pub fn coverage(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.scored() as f64 / total as f64),
        }
    }
}

/// Compares predictions against the values that follow them
#[derive(Debug, Clone, Default)]
pub struct AccuracyTracker {
    counters: AccuracyCounters,
}

impl AccuracyTracker {
    /// Create a tracker with zeroed counters
    pub const fn new() -> Self {
        Self {
            counters: AccuracyCounters {
                correct: 0,
                incorrect: 0,
                no_prediction: 0,
            },
        }
    }

    /// Score `pending` against the value that actually arrived
    pub fn check(&mut self, actual: Sample, pending: &Prediction) -> Outcome {
        let outcome = if pending.is_none() {
            self.counters.no_prediction += 1;
            Outcome::NoPrediction
        } else if pending.matches(actual) {
            self.counters.correct += 1;
            Outcome::Correct
        } else {
            self.counters.incorrect += 1;
            Outcome::Incorrect
        };

        log_trace!("scored {} against {}: {:?}", pending, actual, outcome);
        outcome
    }

    /// Current counters
    pub fn counters(&self) -> AccuracyCounters {
        self.counters
    }

    /// Zero all counters
    pub fn reset(&mut self) {
        self.counters = AccuracyCounters::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_outcome() {
        let mut tracker = AccuracyTracker::new();
        let predicted = Prediction::from_counts(3.0, 1, 1, vec![1.0, 2.0]);

        assert_eq!(tracker.check(3.0, &predicted), Outcome::Correct);
        assert_eq!(tracker.check(4.0, &predicted), Outcome::Incorrect);
        assert_eq!(tracker.check(3.0, &Prediction::none(vec![])), Outcome::NoPrediction);

        let c = tracker.counters();
        assert_eq!((c.correct, c.incorrect, c.no_prediction), (1, 1, 1));
        assert_eq!(c.total(), 3);
    }

    #[test]
    fn ratios() {
        let counters = AccuracyCounters {
            correct: 3,
            incorrect: 1,
            no_prediction: 4,
        };
        assert_eq!(counters.accuracy(), Some(0.75));
        assert_eq!(counters.coverage(), Some(0.5));

        let empty = AccuracyCounters::default();
        assert_eq!(empty.accuracy(), None);
        assert_eq!(empty.coverage(), None);
    }

    #[test]
    fn reset_zeroes() {
        let mut tracker = AccuracyTracker::new();
        tracker.check(1.0, &Prediction::none(vec![]));
        tracker.reset();
        assert_eq!(tracker.counters(), AccuracyCounters::default());
    }
}
