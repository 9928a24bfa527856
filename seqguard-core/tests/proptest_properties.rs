//! Property tests for the windowing, filtering and prediction invariants

mod common;

use proptest::prelude::*;
use seqguard_core::{
    pipeline::{AveragingStage, BucketingStage},
    traits::FilterStage,
    window::SlidingWindow,
    Outcome, SequenceTrie,
};

use common::generators::sawtooth;

fn finite_samples(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, 0..max_len)
}

// Small alphabet so sequences actually repeat
fn small_alphabet(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u8..4).prop_map(f64::from), 0..max_len)
}

// Property 1: window never exceeds capacity and keeps the newest values in order
proptest! {
    #[test]
    fn prop_window_holds_newest(
        capacity in 1usize..16,
        samples in finite_samples(64)
    ) {
        let mut window = SlidingWindow::new(capacity).unwrap();
        for (i, &v) in samples.iter().enumerate() {
            window.push(v);
            prop_assert_eq!(window.len(), (i + 1).min(capacity));
        }

        let expected: Vec<f64> = samples
            .iter()
            .copied()
            .skip(samples.len().saturating_sub(capacity))
            .collect();
        prop_assert_eq!(window.contents(), expected);
    }
}

// Property 2: a sequence recorded k times has count k
proptest! {
    #[test]
    fn prop_trie_counts_records(
        sequence in prop::collection::vec(-50.0f64..50.0, 1..8),
        k in 1u64..20
    ) {
        let mut trie = SequenceTrie::new();
        for i in 1..=k {
            prop_assert_eq!(trie.record(sequence.iter().copied()), i);
        }
        prop_assert_eq!(trie.count(sequence.iter().copied()), k);
        prop_assert_eq!(trie.sequence_count(), 1);
    }
}

// Property 3: confidence is a share of the continuations, never outside [0, 1]
proptest! {
    #[test]
    fn prop_confidence_in_unit_interval(samples in small_alphabet(200)) {
        let mut p = common::processor(3);
        for &v in &samples {
            p.observe(v);
            let prediction = p.current_prediction();
            prop_assert!((0.0..=1.0).contains(&prediction.relative_confidence));
            match prediction.value {
                Some(_) => prop_assert!(prediction.relative_confidence > 0.0),
                None => prop_assert_eq!(prediction.relative_confidence, 0.0),
            }
        }
    }
}

// Property 4: every filtered value past warm-up is scored exactly once
proptest! {
    #[test]
    fn prop_one_check_per_value(
        capacity in 2usize..6,
        samples in small_alphabet(200)
    ) {
        let mut p = common::processor(capacity);
        let mut checks = 0u64;
        for &v in &samples {
            if p.observe(v).outcome().is_some() {
                checks += 1;
            }
        }
        let expected = samples.len().saturating_sub(capacity) as u64;
        prop_assert_eq!(checks, expected);
        prop_assert_eq!(p.current_accuracy().total(), expected);
    }
}

// Property 5: a cycle of distinct values is predicted perfectly once learned
proptest! {
    #[test]
    fn prop_cycle_learned_after_one_period(
        period in 2u32..8,
        capacity in 2usize..8,
        extra in 0usize..50
    ) {
        let len = capacity + period as usize + extra;
        let mut p = common::processor(capacity);
        for v in sawtooth(period, len) {
            let observation = p.observe(v);
            prop_assert_ne!(observation.outcome(), Some(Outcome::Incorrect));
        }

        let counters = p.current_accuracy();
        prop_assert_eq!(counters.no_prediction, u64::from(period) - 1);
        prop_assert_eq!(counters.correct, (len - capacity) as u64 - (u64::from(period) - 1));
    }
}

// Property 6: bucketing lands on the nearest multiple of the granularity
proptest! {
    #[test]
    fn prop_bucket_is_nearest_multiple(
        value in -10_000.0f64..10_000.0,
        granularity in 0.5f64..100.0
    ) {
        let bucketed = BucketingStage::new(granularity).unwrap().bucket(value);

        let steps = bucketed / granularity;
        prop_assert!((steps - steps.round()).abs() < 1e-6);
        prop_assert!((bucketed - value).abs() <= granularity / 2.0 + 1e-9);
    }
}

// Property 7: averaging emits exactly one value per `period` inputs
proptest! {
    #[test]
    fn prop_averaging_cadence(
        period in 1u32..10,
        samples in finite_samples(100)
    ) {
        let mut stage = AveragingStage::new(period).unwrap();
        let emitted: Vec<f64> = samples.iter().filter_map(|&v| stage.process(v)).collect();

        prop_assert_eq!(emitted.len(), samples.len() / period as usize);
        for (group, mean) in samples.chunks_exact(period as usize).zip(&emitted) {
            let expected = group.iter().sum::<f64>() / f64::from(period);
            prop_assert!((mean - expected).abs() < 1e-6);
        }
    }
}

// Property 8: non-finite samples never change the learned state
proptest! {
    #[test]
    fn prop_non_finite_is_inert(
        samples in small_alphabet(50),
        poison in prop::sample::select(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY])
    ) {
        let mut clean = common::processor(2);
        let mut dirty = common::processor(2);

        for &v in &samples {
            clean.observe(v);
            dirty.observe(poison);
            dirty.observe(v);
        }

        prop_assert_eq!(clean.current_accuracy(), dirty.current_accuracy());
        prop_assert_eq!(clean.current_prediction(), dirty.current_prediction());
        prop_assert_eq!(clean.window().contents(), dirty.window().contents());
    }
}
