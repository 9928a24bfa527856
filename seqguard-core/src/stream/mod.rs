//! Sample sources
//!
//! Concrete [`SampleSource`](crate::traits::SampleSource) implementations. A
//! processor drains any source with
//! [`StreamProcessor::process_source`](crate::StreamProcessor::process_source).

pub mod memory;

pub use crate::errors::SourceError;
pub use memory::MemorySource;
