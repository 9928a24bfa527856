//! Next-value predictions derived from the sequence trie

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::MAX_LABEL_VALUES;
use crate::sample::{Sample, SampleKey};

/// Best guess for the next filtered value
///
/// A prediction with `value == None` is a valid state: the trie has not seen the
/// current prefix followed by anything yet. Its confidence is always 0.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prediction {
    /// Predicted value, or `None` when history is insufficient
    pub value: Option<Sample>,
    /// Share of the prefix's continuations taken by `value`, in `[0, 1]`
    pub relative_confidence: f64,
    /// Prefix the prediction was looked up from, oldest first
    pub sequence: Vec<Sample>,
}

impl Prediction {
    /// "No prediction" for the given prefix
    pub fn none(sequence: Vec<Sample>) -> Self {
        Self {
            value: None,
            relative_confidence: 0.0,
            sequence,
        }
    }

    /// Prediction from the winning continuation's count out of the total
    ///
    /// Returns "no prediction" when `total` is zero. `count` must not exceed
    /// `total`; confidence is clamped to 1 if it does.
    pub(crate) fn from_counts(value: Sample, count: u64, total: u64, sequence: Vec<Sample>) -> Self {
        if total == 0 {
            return Self::none(sequence);
        }
        debug_assert!(count <= total, "count {} exceeds total {}", count, total);
        Self {
            value: Some(value),
            relative_confidence: (count as f64 / total as f64).min(1.0),
            sequence,
        }
    }

    /// Whether a value was predicted
    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    /// Whether no value was predicted
    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    /// Exact comparison of the predicted value against an observation
    ///
    /// Uses key identity, so `0.0` matches `-0.0`.
    pub fn matches(&self, actual: Sample) -> bool {
        self.value
            .map(|v| SampleKey::new(v) == SampleKey::new(actual))
            .unwrap_or(false)
    }

    /// Diagnostic label of the source sequence, e.g. `"1,2,3"`
    pub fn label(&self) -> SequenceLabel<'_> {
        SequenceLabel(&self.sequence)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(
                f,
                "[{}] -> {} ({:.3})",
                self.label(),
                v,
                self.relative_confidence
            ),
            None => write!(f, "[{}] -> none", self.label()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Prediction {
    fn format(&self, fmt: defmt::Formatter) {
        match self.value {
            Some(v) => defmt::write!(fmt, "predict {} ({})", v, self.relative_confidence),
            None => defmt::write!(fmt, "no prediction"),
        }
    }
}

/// Comma-separated rendering of a value sequence
///
/// Long sequences are truncated with `...` after [`MAX_LABEL_VALUES`] values.
#[derive(Debug, Clone, Copy)]
pub struct SequenceLabel<'a>(&'a [Sample]);

impl<'a> fmt::Display for SequenceLabel<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().take(MAX_LABEL_VALUES).enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        if self.0.len() > MAX_LABEL_VALUES {
            f.write_str(",...")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_no_prediction() {
        let p = Prediction::from_counts(5.0, 0, 0, vec![1.0, 2.0]);
        assert!(p.is_none());
        assert_eq!(p.relative_confidence, 0.0);
    }

    #[test]
    fn confidence_is_share_of_total() {
        let p = Prediction::from_counts(5.0, 3, 4, vec![1.0]);
        assert_eq!(p.value, Some(5.0));
        assert_eq!(p.relative_confidence, 0.75);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "exceeds total")]
    fn count_above_total_is_rejected() {
        Prediction::from_counts(5.0, 3, 2, vec![1.0]);
    }

    #[test]
    fn matching_uses_exact_identity() {
        let p = Prediction::from_counts(0.0, 1, 1, vec![]);
        assert!(p.matches(-0.0));
        assert!(!p.matches(0.1));
        assert!(!Prediction::none(vec![]).matches(0.0));
    }

    #[test]
    fn display_labels_sequence() {
        let p = Prediction::from_counts(3.0, 1, 2, vec![1.0, 2.0]);
        assert_eq!(format!("{}", p), "[1,2] -> 3 (0.500)");
        assert_eq!(format!("{}", Prediction::none(vec![4.5])), "[4.5] -> none");
    }

    #[test]
    fn long_labels_truncate() {
        let seq: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let p = Prediction::none(seq);
        let label = format!("{}", p.label());
        assert!(label.ends_with(",..."));
        assert_eq!(label.matches(',').count(), MAX_LABEL_VALUES);
    }
}
