//! Fixed-capacity window buffer with recency-indexed access.
//!
//! A [`WindowBuffer`] keeps the last `capacity` items pushed into it, in
//! insertion order. Pushing into a full buffer shifts the window by one in
//! O(1), dropping the oldest item. Index `0` is always the oldest retained
//! item and index `len() - 1` the newest, regardless of how many times the
//! buffer has wrapped.
//!
//! The path tracker uses this to keep the trailing history of emitter
//! positions; aging out of old path points happens implicitly through the
//! overwrite-on-push semantics.
//!
//! # Example
//!
//! ```
//! use windstream::WindowBuffer;
//!
//! let mut buf = WindowBuffer::new(3);
//! for x in [1, 2, 3, 4] {
//!     buf.push(x);
//! }
//! assert_eq!(buf.len(), 3);
//! assert_eq!(buf.get(0), Ok(&2)); // oldest retained
//! assert_eq!(buf.last(), Some(&4)); // newest
//! ```

use crate::error::BufferError;
use std::ops::{Index, IndexMut};

/// Fixed-capacity circular buffer preserving insertion order.
///
/// Indices are *recency indices*: `0` is the least recently pushed live
/// element, `len() - 1` the most recent. All operations are O(1).
#[derive(Clone, Debug)]
pub struct WindowBuffer<T> {
    slots: Vec<T>,
    capacity: usize,
    /// Total items ever pushed. Logical length is `min(written, capacity)`.
    written: usize,
}

impl<T> WindowBuffer<T> {
    /// Create an empty buffer holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Callers going through the
    /// [`WindStream`](crate::WindStream) builder get a
    /// [`ConfigError`](crate::ConfigError) instead.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "WindowBuffer capacity must be at least 1");
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    /// Push an item, overwriting the oldest one once the buffer is full.
    ///
    /// Always succeeds; never reallocates after the buffer first fills.
    pub fn push(&mut self, item: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(item);
        } else {
            self.slots[self.written % self.capacity] = item;
        }
        self.written += 1;
    }

    /// Number of live items, `min(written, capacity)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.written.min(self.capacity)
    }

    /// Whether nothing has been pushed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Maximum number of items retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of items ever pushed, including overwritten ones.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Map a recency index to a backing slot. Caller checks range.
    #[inline]
    fn slot(&self, index: usize) -> usize {
        if self.written < self.capacity {
            index
        } else {
            (self.written + index) % self.capacity
        }
    }

    /// Get the item at recency index `index` (0 = oldest live).
    ///
    /// Returns [`BufferError::IndexOutOfRange`] for `index >= len()` rather
    /// than wrapping back into the live window.
    pub fn get(&self, index: usize) -> Result<&T, BufferError> {
        if index < self.len() {
            Ok(&self.slots[self.slot(index)])
        } else {
            Err(BufferError::IndexOutOfRange { index, len: self.len() })
        }
    }

    /// Replace the item at recency index `index`, same range rules as [`get`](Self::get).
    pub fn set(&mut self, index: usize, value: T) -> Result<(), BufferError> {
        if index < self.len() {
            let slot = self.slot(index);
            self.slots[slot] = value;
            Ok(())
        } else {
            Err(BufferError::IndexOutOfRange { index, len: self.len() })
        }
    }

    /// The most recently pushed item, or `None` if the buffer is empty.
    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Iterate live items oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len()).map(move |i| &self.slots[self.slot(i)])
    }
}

impl<T: Clone> WindowBuffer<T> {
    /// Push `capacity` clones of `item`, filling the buffer.
    ///
    /// Initialization convenience; not intended for the per-tick hot path.
    pub fn fill(&mut self, item: T) {
        for _ in 0..self.capacity {
            self.push(item.clone());
        }
    }
}

impl<T> Index<usize> for WindowBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for WindowBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        if index >= len {
            panic!("{}", BufferError::IndexOutOfRange { index, len });
        }
        let slot = self.slot(index);
        &mut self.slots[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_push_before_full_keeps_direct_order() {
        let mut buf = WindowBuffer::new(5);
        buf.push(10);
        buf.push(20);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(0), Ok(&10));
        assert_eq!(buf.get(1), Ok(&20));
        assert_eq!(buf.last(), Some(&20));
    }

    #[test]
    fn test_window_shift_on_overflow() {
        // Capacity 3, four pushes: the concrete scenario from the design notes.
        let mut buf = WindowBuffer::new(3);
        for x in 0..4 {
            buf.push(x);
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(0), Ok(&1));
        assert_eq!(buf.get(1), Ok(&2));
        assert_eq!(buf.get(2), Ok(&3));
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut buf = WindowBuffer::new(4);
        for x in 0..20 {
            buf.push(x);
            assert!(buf.len() <= 4);
        }
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.written(), 20);
    }

    #[test]
    fn test_order_invariant_random_sequences() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let capacity = rng.gen_range(1..16);
            let pushes = rng.gen_range(1..64);
            let mut buf = WindowBuffer::new(capacity);
            for x in 0..pushes {
                buf.push(x);
            }
            let len = pushes.min(capacity);
            assert_eq!(buf.len(), len);
            // Newest is always the last pushed value, oldest the
            // max(0, pushes - capacity)-th.
            assert_eq!(buf.last(), Some(&(pushes - 1)));
            assert_eq!(buf.get(0), Ok(&(pushes.saturating_sub(capacity))));
            let collected: Vec<usize> = buf.iter().copied().collect();
            let expected: Vec<usize> = (pushes.saturating_sub(capacity)..pushes).collect();
            assert_eq!(collected, expected);
        }
    }

    #[test]
    fn test_out_of_range_is_an_error_not_a_wrap() {
        let mut buf = WindowBuffer::new(3);
        buf.push(1);
        assert_eq!(
            buf.get(1),
            Err(BufferError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            buf.get(3),
            Err(BufferError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            buf.set(2, 9),
            Err(BufferError::IndexOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_set_writes_through_recency_mapping() {
        let mut buf = WindowBuffer::new(3);
        for x in 0..5 {
            buf.push(x);
        }
        // Live window is [2, 3, 4]; overwrite the oldest.
        buf.set(0, 99).unwrap();
        assert_eq!(buf.get(0), Ok(&99));
        assert_eq!(buf.get(2), Ok(&4));
    }

    #[test]
    fn test_last_on_partially_filled_buffer() {
        let mut buf: WindowBuffer<i32> = WindowBuffer::new(10);
        assert_eq!(buf.last(), None);
        buf.push(7);
        assert_eq!(buf.last(), Some(&7));
    }

    #[test]
    fn test_fill() {
        let mut buf = WindowBuffer::new(4);
        buf.fill(3.5f32);
        assert_eq!(buf.len(), 4);
        assert!(buf.iter().all(|&x| x == 3.5));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_out_of_range() {
        let buf: WindowBuffer<i32> = WindowBuffer::new(3);
        let _ = buf[0];
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn test_zero_capacity_panics() {
        let _: WindowBuffer<i32> = WindowBuffer::new(0);
    }
}
