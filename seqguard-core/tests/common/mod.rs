//! Common test utilities for integration tests
//!
//! This module provides:
//! - Deterministic stream generators (repeating patterns, noise, drift)
//! - Assertion helpers for accuracy counters

#![allow(dead_code)]

pub mod generators;

use seqguard_core::{AccuracyCounters, StreamProcessor};

/// Build an unfiltered processor
pub fn processor(capacity: usize) -> StreamProcessor {
    StreamProcessor::builder()
        .window_capacity(capacity)
        .build()
        .expect("valid capacity")
}

/// Feed samples and return the final accuracy counters
pub fn run(processor: &mut StreamProcessor, samples: &[f64]) -> AccuracyCounters {
    for &s in samples {
        processor.observe(s);
    }
    processor.current_accuracy()
}

/// Assert all three accuracy counters at once
#[macro_export]
macro_rules! assert_accuracy {
    ($counters:expr, correct: $c:expr, incorrect: $i:expr, none: $n:expr) => {
        let counters = $counters;
        assert_eq!(
            (counters.correct, counters.incorrect, counters.no_prediction),
            ($c, $i, $n),
            "Expected correct/incorrect/none = {}/{}/{}, got {:?}",
            $c,
            $i,
            $n,
            counters
        );
    };
}
