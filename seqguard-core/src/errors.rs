//! Error Types for Processor Configuration and Sample Sources
//!
//! ## Design Philosophy
//!
//! SeqGuard separates two very different kinds of failure:
//!
//! 1. **Configuration errors** are fatal and happen exactly once, when a processor
//!    (or one of its parts) is constructed. A bad window capacity or filter
//!    parameter never reaches the hot path.
//!
//! 2. **Runtime conditions** are not errors. Once a processor is running,
//!    `observe` is total: a sample can be absorbed by a filter, rejected because it
//!    is not finite, or processed. "No prediction" is a normal prediction state,
//!    not a fault.
//!
//! Like the rest of the crate, errors are small, `Copy`, and carry no heap data so
//! they are cheap to return and compare on embedded targets.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use seqguard_core::{ConfigError, StreamProcessor};
//!
//! match StreamProcessor::builder().window_capacity(1).build() {
//!     Ok(_) => unreachable!(),
//!     Err(ConfigError::WindowTooSmall { capacity, min }) => {
//!         assert_eq!((capacity, min), (1, 2));
//!     }
//!     Err(other) => panic!("unexpected error: {}", other),
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Result type for construction-time operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid construction parameters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Window capacity below the minimum the component needs
    #[error("Window capacity {capacity} is below the minimum of {min}")]
    WindowTooSmall {
        /// Requested capacity
        capacity: usize,
        /// Smallest accepted capacity
        min: usize,
    },

    /// Averaging period must be at least one sample
    #[error("Averaging period {period} must be at least 1")]
    InvalidPeriod {
        /// Requested period
        period: u32,
    },

    /// Bucket granularity must be a finite, strictly positive number
    #[error("Bucket granularity {granularity} must be finite and greater than 0")]
    InvalidGranularity {
        /// Requested granularity
        granularity: f64,
    },

    /// Filter chain longer than the pipeline can hold
    #[error("Filter chain exceeds the maximum of {max} stages")]
    TooManyStages {
        /// Maximum number of stages
        max: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::WindowTooSmall { capacity, min } =>
                defmt::write!(fmt, "Window capacity {} below {}", capacity, min),
            Self::InvalidPeriod { period } =>
                defmt::write!(fmt, "Invalid period {}", period),
            Self::InvalidGranularity { granularity } =>
                defmt::write!(fmt, "Invalid granularity {}", granularity),
            Self::TooManyStages { max } =>
                defmt::write!(fmt, "More than {} stages", max),
        }
    }
}

/// Errors reported by sample sources
///
/// Sources use the `nb` two-level model: `nb::Error::WouldBlock` means "no sample
/// yet, try again", `nb::Error::Other(SourceError)` means the source itself has
/// something to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceError<E> {
    /// Transport-level error from the underlying source
    Transport(E),
    /// The source has no more samples
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for SourceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for SourceError<E> {}
