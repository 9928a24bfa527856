//! Sample Source Traits
//!
//! Sources deliver raw samples to a processor using a pull-based model built on
//! the `nb` crate, so callers need no async runtime.
//!
//! ## Common Patterns
//!
//! ```rust
//! use seqguard_core::traits::SampleSource;
//!
//! fn drain<S: SampleSource>(source: &mut S, sink: &mut Vec<f64>) -> Result<(), S::Error> {
//!     loop {
//!         match source.poll_next() {
//!             Ok(sample) => sink.push(sample),
//!             Err(nb::Error::WouldBlock) => return Ok(()),
//!             Err(nb::Error::Other(e)) => return Err(e),
//!         }
//!     }
//! }
//! ```

use crate::sample::Sample;

/// Pull-based source of raw samples
///
/// ## Error Handling
///
/// Sources use a two-level error model:
/// - `nb::Error::WouldBlock` - no sample available right now
/// - `nb::Error::Other(E)` - the source has something to report, including the
///   end of a finite stream
pub trait SampleSource {
    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next sample
    ///
    /// ## Contract
    ///
    /// - Must not block indefinitely
    /// - Multiple `WouldBlock` returns are normal
    /// - End-of-stream should be sticky
    fn poll_next(&mut self) -> nb::Result<Sample, Self::Error>;

    /// Returns bounds on remaining samples
    ///
    /// Default implementation returns `(0, None)` indicating unknown size.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }

    /// Whether an error marks the clean end of the stream
    ///
    /// Processors stop draining without reporting an error when this returns
    /// `true`. The default treats every error as a real failure.
    fn is_end_of_stream(_error: &Self::Error) -> bool {
        false
    }
}
