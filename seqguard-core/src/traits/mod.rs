//! Core Traits and Extension Points
//!
//! - [`stage`] - Filter stages that condition the raw stream
//! - [`source`] - Pull-based sources of raw samples
//!
//! Both are plugged into a [`crate::StreamProcessor`]: stages at construction,
//! sources when draining.

pub mod source;
pub mod stage;

pub use source::SampleSource;
pub use stage::FilterStage;
