//! Sample values and their exact-match keys
//!
//! Samples are plain `f64` values. Floats are neither `Eq` nor `Hash`, so anything
//! that needs exact identity (trie children, distinct-value counts) goes through
//! [`SampleKey`], which compares bit patterns after folding `-0.0` into `0.0`.
//!
//! Non-finite samples never get this far: the processor rejects them before the
//! filter chain, so a key always wraps a finite value.

use core::cmp::Ordering;
use core::fmt;

/// A single raw or filtered sample
pub type Sample = f64;

/// Check whether a sample can enter the engine
#[inline]
pub fn is_valid(value: Sample) -> bool {
    value.is_finite()
}

/// Exact-identity key for a finite sample
///
/// Two keys are equal iff their samples are bit-for-bit identical, except that
/// positive and negative zero share one key. Ordering is numeric.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey(u64);

impl SampleKey {
    /// Build the key for a sample
    #[inline]
    pub fn new(value: Sample) -> Self {
        // -0.0 == 0.0 numerically; give them one key
        let value = if value == 0.0 { 0.0 } else { value };
        Self(value.to_bits())
    }

    /// Sample this key stands for
    #[inline]
    pub fn value(self) -> Sample {
        f64::from_bits(self.0)
    }
}

impl From<Sample> for SampleKey {
    fn from(value: Sample) -> Self {
        Self::new(value)
    }
}

impl Ord for SampleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().total_cmp(&other.value())
    }
}

impl PartialOrd for SampleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SampleKey({})", self.value())
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
