//! Memory-based sources for testing and replay
//!
//! Useful for:
//! - Unit testing with known sequences
//! - Replaying recorded samples
//! - Feeding synthetic patterns

use crate::errors::SourceError;
use crate::sample::Sample;
use crate::traits::SampleSource;

/// Sample source over a borrowed slice
///
/// ## Example
///
/// ```rust
/// use seqguard_core::stream::MemorySource;
/// use seqguard_core::traits::SampleSource;
///
/// let samples = [1.0, 2.0, 3.0];
/// let mut source = MemorySource::new(&samples);
///
/// let mut seen = Vec::new();
/// while let Ok(sample) = source.poll_next() {
///     seen.push(sample);
/// }
/// assert_eq!(seen, samples);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource<'a> {
    /// Samples to deliver
    samples: &'a [Sample],
    /// Current position
    position: usize,
}

impl<'a> MemorySource<'a> {
    /// Create new source from slice
    pub fn new(samples: &'a [Sample]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if source is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}

impl<'a> SampleSource for MemorySource<'a> {
    type Error = SourceError<core::convert::Infallible>;

    fn poll_next(&mut self) -> nb::Result<Sample, Self::Error> {
        let sample = self
            .samples
            .get(self.position)
            .copied()
            .ok_or(nb::Error::Other(SourceError::EndOfStream))?;
        self.position += 1;
        Ok(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len() - self.position;
        (remaining, Some(remaining))
    }

    fn is_end_of_stream(error: &Self::Error) -> bool {
        matches!(error, SourceError::EndOfStream)
    }
}
