//! Frequency-Counting Sequence Trie
//!
//! ## Overview
//!
//! The trie maps value sequences to how often they occurred. Each level of the
//! tree is one position in the sequence, oldest value at depth 1:
//!
//! ```text
//! record([1,2,3]) twice, record([1,2,9]) once:
//!
//! root
//!  └─ 1
//!      └─ 2
//!          ├─ 3   count 2
//!          └─ 9   count 1
//!
//! predict_from([1,2]) -> 3, confidence 2/3
//! ```
//!
//! Recording walks (and creates) one node per value and bumps the terminal
//! count. Predicting walks the same path without creating anything and compares
//! the counts of the children found at the end.
//!
//! ## Child Order and Tie-Break
//!
//! Children live in a `BTreeMap` keyed by value, so one level costs
//! `O(log fan-out)` even on unfiltered streams where every value is new. Each
//! child also remembers its rank among its siblings (0 for the first value ever
//! recorded after that prefix). When two continuations share the highest count,
//! the lower rank wins. This keeps predictions deterministic and independent of
//! the numeric value of the samples.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use crate::prediction::Prediction;
use crate::sample::{Sample, SampleKey};
use crate::window::SlidingWindow;

/// One node of the trie
///
/// `count` is non-zero only on nodes that terminate a recorded sequence and equals
/// the number of times that sequence was recorded.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    count: u64,
    /// Position among siblings in first-recorded order
    rank: usize,
    children: BTreeMap<SampleKey, TrieNode>,
}

impl TrieNode {
    const fn new(rank: usize) -> Self {
        Self {
            count: 0,
            rank,
            children: BTreeMap::new(),
        }
    }

    /// Times the sequence ending here was recorded
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Position among siblings, 0 for the first one recorded
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Children in ascending value order
    pub fn children(&self) -> impl Iterator<Item = (Sample, &TrieNode)> + '_ {
        self.children.iter().map(|(k, n)| (k.value(), n))
    }

    fn child(&self, key: SampleKey) -> Option<&TrieNode> {
        self.children.get(&key)
    }

    /// Returns the child and whether it had to be created
    fn child_or_insert(&mut self, key: SampleKey) -> (&mut TrieNode, bool) {
        let rank = self.children.len();
        let mut created = false;
        let child = self.children.entry(key).or_insert_with(|| {
            created = true;
            TrieNode::new(rank)
        });
        (child, created)
    }
}

/// Prefix tree over value sequences with occurrence counts
#[derive(Debug, Clone, Default)]
pub struct SequenceTrie {
    root: TrieNode,
    /// Nodes below the root
    nodes: usize,
    /// Distinct sequences with a non-zero count
    sequences: usize,
    /// Total `record` calls
    recorded: u64,
}

impl SequenceTrie {
    /// Create an empty trie
    pub const fn new() -> Self {
        Self {
            root: TrieNode::new(0),
            nodes: 0,
            sequences: 0,
            recorded: 0,
        }
    }

    /// Record one occurrence of `sequence`
    ///
    /// Creates any missing nodes along the path and increments the terminal
    /// count. Returns the terminal's new count. Recording an empty sequence is a
    /// no-op returning 0; the root never carries a count.
    pub fn record<I>(&mut self, sequence: I) -> u64
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut node = &mut self.root;
        let mut depth = 0usize;

        for value in sequence {
            let (child, created) = node.child_or_insert(SampleKey::new(value));
            if created {
                self.nodes += 1;
            }
            node = child;
            depth += 1;
        }

        if depth == 0 {
            return 0;
        }

        if node.count == 0 {
            self.sequences += 1;
        }
        node.count = node.count.saturating_add(1);
        self.recorded += 1;
        node.count
    }

    /// Predict the value that follows `prefix`
    ///
    /// Walks existing nodes only. A missing node, or a node whose children carry
    /// no counts, yields "no prediction". Otherwise the child with the strictly
    /// highest count wins, first-recorded on ties, and confidence is its share of
    /// the children's total count.
    pub fn predict_from<I>(&self, prefix: I) -> Prediction
    where
        I: IntoIterator<Item = Sample>,
    {
        let sequence: Vec<Sample> = prefix.into_iter().collect();

        let node = match self.find(&sequence) {
            Some(node) => node,
            None => return Prediction::none(sequence),
        };

        let mut total: u64 = 0;
        let mut best: Option<(SampleKey, &TrieNode)> = None;

        for (key, child) in node.children.iter().filter(|(_, c)| c.count > 0) {
            total = total.saturating_add(child.count);
            // Higher count wins; on equal counts the lower rank stays
            match best {
                Some((_, b)) if (child.count, b.rank) <= (b.count, child.rank) => {}
                _ => best = Some((*key, child)),
            }
        }

        match best {
            Some((key, child)) => {
                Prediction::from_counts(key.value(), child.count, total, sequence)
            }
            None => Prediction::none(sequence),
        }
    }

    /// Record the full window, then predict from the window minus its oldest value
    ///
    /// This is the per-sample learning step. The returned prediction is for the
    /// next value to arrive, made before that value is seen.
    pub fn record_and_predict(&mut self, window: &SlidingWindow) -> Prediction {
        self.record(window.iter());
        self.predict_from(window.suffix())
    }

    /// Times `sequence` has been recorded
    pub fn count<I>(&self, sequence: I) -> u64
    where
        I: IntoIterator<Item = Sample>,
    {
        let sequence: Vec<Sample> = sequence.into_iter().collect();
        self.find(&sequence).map(|node| node.count).unwrap_or(0)
    }

    /// Values seen after `prefix` with their counts, in first-recorded order
    pub fn continuations<I>(&self, prefix: I) -> Vec<(Sample, u64)>
    where
        I: IntoIterator<Item = Sample>,
    {
        let prefix: Vec<Sample> = prefix.into_iter().collect();
        let node = match self.find(&prefix) {
            Some(node) => node,
            None => return Vec::new(),
        };

        let mut counted: Vec<(usize, Sample, u64)> = node
            .children
            .iter()
            .filter(|(_, child)| child.count > 0)
            .map(|(key, child)| (child.rank, key.value(), child.count))
            .collect();
        counted.sort_unstable_by_key(|&(rank, _, _)| rank);
        counted.into_iter().map(|(_, value, count)| (value, count)).collect()
    }

    /// Node reached by walking `sequence`, if every step exists
    pub fn find(&self, sequence: &[Sample]) -> Option<&TrieNode> {
        sequence
            .iter()
            .try_fold(&self.root, |node, &value| node.child(SampleKey::new(value)))
    }

    /// Root node
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Distinct sequences recorded at least once
    pub fn sequence_count(&self) -> usize {
        self.sequences
    }

    /// Nodes below the root
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Total number of recorded occurrences
    pub fn total_recorded(&self) -> u64 {
        self.recorded
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Forget everything
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_exact_sequence() {
        let mut trie = SequenceTrie::new();
        assert_eq!(trie.record([1.0, 2.0, 3.0]), 1);
        assert_eq!(trie.record([1.0, 2.0, 3.0]), 2);
        assert_eq!(trie.record([1.0, 2.0, 4.0]), 1);

        assert_eq!(trie.count([1.0, 2.0, 3.0]), 2);
        assert_eq!(trie.count([1.0, 2.0, 4.0]), 1);
        // Interior nodes carry no count
        assert_eq!(trie.count([1.0, 2.0]), 0);
        assert_eq!(trie.count([9.0]), 0);

        assert_eq!(trie.sequence_count(), 2);
        assert_eq!(trie.node_count(), 4);
        assert_eq!(trie.total_recorded(), 3);
    }

    #[test]
    fn empty_sequence_is_noop() {
        let mut trie = SequenceTrie::new();
        assert_eq!(trie.record(core::iter::empty()), 0);
        assert!(trie.is_empty());
        assert_eq!(trie.root().count(), 0);
    }

    #[test]
    fn unknown_prefix_predicts_none() {
        let mut trie = SequenceTrie::new();
        trie.record([1.0, 2.0, 3.0]);

        let p = trie.predict_from([2.0, 3.0]);
        assert!(p.is_none());
        assert_eq!(p.relative_confidence, 0.0);
        assert_eq!(p.sequence, vec![2.0, 3.0]);
    }

    #[test]
    fn single_continuation_is_certain() {
        let mut trie = SequenceTrie::new();
        trie.record([1.0, 2.0, 3.0]);
        trie.record([1.0, 2.0, 3.0]);

        let p = trie.predict_from([1.0, 2.0]);
        assert_eq!(p.value, Some(3.0));
        assert_eq!(p.relative_confidence, 1.0);
    }

    #[test]
    fn highest_count_wins() {
        let mut trie = SequenceTrie::new();
        trie.record([1.0, 2.0, 9.0]);
        trie.record([1.0, 2.0, 3.0]);
        trie.record([1.0, 2.0, 3.0]);
        trie.record([1.0, 2.0, 4.0]);

        let p = trie.predict_from([1.0, 2.0]);
        assert_eq!(p.value, Some(3.0));
        assert_eq!(p.relative_confidence, 0.5);
    }

    #[test]
    fn ties_keep_first_recorded() {
        let mut trie = SequenceTrie::new();
        trie.record([5.0, 8.0]);
        trie.record([5.0, 2.0]);

        let p = trie.predict_from([5.0]);
        assert_eq!(p.value, Some(8.0));
        assert_eq!(p.relative_confidence, 0.5);

        // Overtaking requires a strictly higher count
        trie.record([5.0, 2.0]);
        assert_eq!(trie.predict_from([5.0]).value, Some(2.0));
    }

    #[test]
    fn node_without_counted_children_predicts_none() {
        let mut trie = SequenceTrie::new();
        trie.record([1.0, 2.0, 3.0]);

        // [1] exists but its only child is an interior node
        let p = trie.predict_from([1.0]);
        assert!(p.is_none());
        assert_eq!(p.relative_confidence, 0.0);
    }

    #[test]
    fn record_and_predict_uses_window_suffix() {
        let mut trie = SequenceTrie::new();
        let mut window = SlidingWindow::new(3).unwrap();
        for v in [1.0, 2.0, 1.0, 2.0] {
            window.push(v);
        }

        // window [2,1,2]; suffix [1,2] was never followed by anything yet
        let p = trie.record_and_predict(&window);
        assert!(p.is_none());
        assert_eq!(trie.count([2.0, 1.0, 2.0]), 1);

        window.push(1.0);
        // window [1,2,1]; suffix [2,1] was followed by 2 once
        let p = trie.record_and_predict(&window);
        assert_eq!(p.value, Some(2.0));
        assert_eq!(p.sequence, vec![2.0, 1.0]);
    }

    #[test]
    fn counts_are_64_bit() {
        let mut trie = SequenceTrie::new();
        let count: u64 = trie.record([1.0, 2.0]);
        assert_eq!(count, 1);
        assert_eq!(trie.count([1.0, 2.0]), 1u64);
    }

    #[test]
    fn wide_fan_out_keeps_recorded_rank() {
        let mut trie = SequenceTrie::new();
        // Descending values so key order and recorded order disagree
        for i in (0..10_000).rev() {
            trie.record([f64::from(i), 0.0]);
            trie.record([-1.0, f64::from(i)]);
        }

        // 10,001 root children, one 0 under each i, 10,000 followers of -1
        assert_eq!(trie.node_count(), 30_001);
        assert_eq!(trie.count([4_321.0, 0.0]), 1);

        // All 10,000 followers of -1 tie; the first recorded was 9,999
        let p = trie.predict_from([-1.0]);
        assert_eq!(p.value, Some(9_999.0));
        assert_eq!(p.relative_confidence, 1.0 / 10_000.0);
        assert_eq!(
            &trie.continuations([-1.0])[..2],
            &[(9_999.0, 1u64), (9_998.0, 1u64)]
        );
    }

    #[test]
    fn continuations_in_recorded_order() {
        let mut trie = SequenceTrie::new();
        trie.record([0.0, 7.0]);
        trie.record([0.0, -3.0]);
        trie.record([0.0, 7.0]);

        assert_eq!(trie.continuations([0.0]), vec![(7.0, 2), (-3.0, 1)]);
        assert!(trie.continuations([42.0]).is_empty());
    }

    #[test]
    fn negative_zero_shares_path() {
        let mut trie = SequenceTrie::new();
        trie.record([-0.0, 1.0]);
        trie.record([0.0, 1.0]);
        assert_eq!(trie.count([0.0, 1.0]), 2);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut trie = SequenceTrie::new();
        trie.record([1.0, 2.0]);
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
        assert!(trie.predict_from([1.0]).is_none());
    }
}
