//! Fixed-Capacity Sliding Window over the Filtered Stream
//!
//! ## Overview
//!
//! The window holds the most recent `capacity` filtered values, oldest first. It
//! is the "short-term memory" the sequence trie learns from: every time it is full,
//! its contents form one sequence to record.
//!
//! ## Design Rationale
//!
//! The window is a ring buffer: a boxed slice allocated once at construction, a
//! start index pointing at the oldest value and a length counter.
//!
//! - O(1) push (overwrites the oldest slot when full)
//! - O(capacity) traversal, oldest to newest
//! - No allocation after construction
//!
//! Capacity is a runtime parameter because it comes from processor configuration,
//! so unlike a const-generic buffer the storage is a `Box<[f64]>`.
//!
//! ### Memory Layout
//!
//! ```text
//! SlidingWindow capacity 3, after pushing 1, 2, 3, 4:
//! ┌─────┬─────┬─────┐
//! │  4  │  2  │  3  │  ← slots
//! └─────┴─────┴─────┘
//!          ↑
//!          └── start = 1 (oldest)
//!
//! contents(): [2, 3, 4]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use seqguard_core::window::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(3).unwrap();
//! for v in [1.0, 2.0, 3.0, 4.0] {
//!     window.push(v);
//! }
//!
//! assert!(window.is_full());
//! assert_eq!(window.contents(), vec![2.0, 3.0, 4.0]);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec, vec::Vec};

use crate::errors::{ConfigError, ConfigResult};
use crate::sample::Sample;

/// Fixed-capacity FIFO of the most recent samples
///
/// ## Internal Invariants
///
/// - `start < capacity` (oldest slot is always a valid index)
/// - `len <= capacity`
/// - logical index `i` lives at physical slot `(start + i) % capacity`
///
/// ## Thread Safety
///
/// Not synchronized. It is owned by one processor and mutated only through
/// [`SlidingWindow::push`].
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Slot storage, allocated once
    slots: Box<[Sample]>,

    /// Physical index of the oldest value
    start: usize,

    /// Number of valid values; grows to capacity then stays there
    len: usize,
}

impl SlidingWindow {
    /// Create an empty window
    ///
    /// Fails on a zero capacity. The processor applies its own, stricter minimum.
    pub fn new(capacity: usize) -> ConfigResult<Self> {
        if capacity == 0 {
            return Err(ConfigError::WindowTooSmall { capacity, min: 1 });
        }

        Ok(Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            start: 0,
            len: 0,
        })
    }

    /// Append a value at the newest end
    ///
    /// When the window is already full the oldest value is dropped to make room.
    ///
    /// ```rust
    /// # use seqguard_core::window::SlidingWindow;
    /// let mut w = SlidingWindow::new(2).unwrap();
    /// w.push(1.0);
    /// w.push(2.0);
    /// w.push(3.0); // evicts 1.0
    /// assert_eq!(w.oldest(), Some(2.0));
    /// ```
    pub fn push(&mut self, value: Sample) {
        let capacity = self.capacity();

        if self.len < capacity {
            let idx = (self.start + self.len) % capacity;
            self.slots[idx] = value;
            self.len += 1;
        } else {
            // Full: the oldest slot becomes the newest
            self.slots[self.start] = value;
            self.start = (self.start + 1) % capacity;
        }
    }

    /// Maximum number of values held
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if window holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Oldest value, if any
    pub fn oldest(&self) -> Option<Sample> {
        self.get(0)
    }

    /// Most recently pushed value, if any
    pub fn newest(&self) -> Option<Sample> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Value at a logical index (0 = oldest, len-1 = newest)
    pub fn get(&self, index: usize) -> Option<Sample> {
        if index >= self.len {
            return None;
        }
        Some(self.slots[(self.start + index) % self.capacity()])
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> WindowIter<'_> {
        WindowIter {
            window: self,
            front: 0,
            back: self.len,
        }
    }

    /// Copy of the contents, oldest to newest
    pub fn contents(&self) -> Vec<Sample> {
        self.iter().collect()
    }

    /// Iterate over everything but the oldest value
    ///
    /// On a full window this is the prefix that remains once the next push evicts
    /// today's oldest value.
    pub fn suffix(&self) -> core::iter::Skip<WindowIter<'_>> {
        self.iter().skip(1)
    }

    /// Drop all values
    pub fn clear(&mut self) {
        self.start = 0;
        self.len = 0;
    }
}

/// Iterator over window contents, oldest to newest
#[derive(Debug, Clone)]
pub struct WindowIter<'a> {
    window: &'a SlidingWindow,
    front: usize,
    back: usize,
}

impl<'a> Iterator for WindowIter<'a> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.window.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for WindowIter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.window.get(self.back)
    }
}

impl<'a> ExactSizeIterator for WindowIter<'a> {}
