use std::fmt;
use std::ops::Index;

use crate::error::{BufferError, Result};

/// Fixed-capacity circular byte buffer with overwrite-on-full semantics.
///
/// Logical index `i` (0 = oldest byte) maps to `storage[(head + i) % capacity]`
/// and is valid for `i < len()`. The capacity is set once and never changes.
pub struct RingBuffer {
    storage: Box<[u8]>,
    /// Next byte to read.
    head: usize,
    /// Next slot to write.
    tail: usize,
    count: usize,
}

impl RingBuffer {
    /// Create an empty buffer holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            count: 0,
        })
    }

    /// Maximum number of bytes the buffer holds.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of valid bytes currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Number of bytes that can be pushed before the oldest byte is evicted.
    pub fn free(&self) -> usize {
        self.capacity() - self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Append a byte. When the buffer is full the oldest byte is discarded.
    pub fn push(&mut self, byte: u8) {
        let full = self.is_full();
        self.storage[self.tail] = byte;
        self.tail = self.wrap(self.tail + 1);
        if full {
            self.head = self.tail;
            tracing::trace!(capacity = self.capacity(), "ring buffer full, evicted oldest byte");
        } else {
            self.count += 1;
        }
    }

    /// Remove and return the oldest byte.
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.storage[self.head];
        self.head = self.wrap(self.head + 1);
        self.count -= 1;
        Some(byte)
    }

    /// Peek at the oldest byte without removing it.
    pub fn top(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.storage[self.head])
        }
    }

    /// Push every byte of `bytes` in order.
    ///
    /// If `bytes` is longer than the capacity only its last `capacity` bytes
    /// survive, exactly as if each byte had been pushed one by one.
    pub fn insert(&mut self, bytes: &[u8]) {
        let skip = bytes.len().saturating_sub(self.capacity());
        for &byte in &bytes[skip..] {
            self.push(byte);
        }
    }

    /// Read the byte at logical offset `index` from the oldest byte.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index < self.count {
            Some(self.storage[self.wrap(self.head + index)])
        } else {
            None
        }
    }

    /// Drop up to `n` bytes from the front. Returns how many were dropped.
    pub fn discard(&mut self, n: usize) -> usize {
        let n = n.min(self.count);
        self.head = self.wrap(self.head + n);
        self.count -= n;
        n
    }

    /// Copy bytes starting at logical `offset` into `dst`.
    ///
    /// Returns the number of bytes copied, which is short when fewer than
    /// `dst.len()` bytes are stored past `offset`.
    pub fn copy_range(&self, offset: usize, dst: &mut [u8]) -> usize {
        let available = self.count.saturating_sub(offset);
        let n = dst.len().min(available);
        if n == 0 {
            return 0;
        }

        let start = self.wrap(self.head + offset);
        let first = n.min(self.capacity() - start);
        dst[..first].copy_from_slice(&self.storage[start..start + first]);
        dst[first..n].copy_from_slice(&self.storage[..n - first]);
        n
    }

    /// Remove all bytes.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Iterate over stored bytes, oldest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            ring: self,
            front: 0,
            back: self.count,
        }
    }

    fn wrap(&self, index: usize) -> usize {
        index % self.capacity()
    }
}

impl Index<usize> for RingBuffer {
    type Output = u8;

    /// Panics when `index >= len()`, like slice indexing.
    fn index(&self, index: usize) -> &u8 {
        assert!(
            index < self.count,
            "ring buffer index out of range: {index} >= {}",
            self.count
        );
        &self.storage[self.wrap(self.head + index)]
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.count)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

/// Iterator over a ring buffer's bytes in logical order.
pub struct Iter<'a> {
    ring: &'a RingBuffer,
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.front >= self.back {
            return None;
        }
        let byte = self.ring.get(self.front);
        self.front += 1;
        byte
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<u8> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.ring.get(self.back)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RingBuffer {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, bytes: &[u8]) -> RingBuffer {
        let mut ring = RingBuffer::new(capacity).unwrap();
        ring.insert(bytes);
        ring
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(RingBuffer::new(0).unwrap_err(), BufferError::ZeroCapacity);
    }

    #[test]
    fn new_buffer_is_empty() {
        let ring = RingBuffer::new(3).unwrap();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 3);
        assert_eq!(ring.top(), None);
    }

    #[test]
    fn push_pop_fifo() {
        let mut ring = RingBuffer::new(4).unwrap();
        ring.push(10);
        ring.push(20);
        ring.push(30);

        assert_eq!(ring.len(), 3);
        assert_eq!(ring.top(), Some(10));
        assert_eq!(ring.pop(), Some(10));
        assert_eq!(ring.pop(), Some(20));
        assert_eq!(ring.pop(), Some(30));
        assert_eq!(ring.pop(), None);
        assert!(ring.is_empty());
    }

    #[test]
    fn full_after_capacity_pushes() {
        let mut ring = RingBuffer::new(3).unwrap();
        ring.push(10);
        ring.push(20);
        ring.push(30);

        assert!(ring.is_full());
        assert_eq!(ring[1], 20);
        assert_eq!(ring.top(), Some(10));

        ring.pop();
        assert!(!ring.is_full());
        assert!(!ring.is_empty());
        assert_eq!(ring.free(), 1);
    }

    #[test]
    fn push_when_full_evicts_oldest() {
        let mut ring = filled(3, &[1, 2, 3]);
        ring.push(4);
        ring.push(5);

        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(ring.top(), Some(3));
    }

    #[test]
    fn sustained_overflow_loses_data() {
        let mut ring = RingBuffer::new(8).unwrap();
        for byte in 0..=255u8 {
            ring.push(byte);
        }

        assert_eq!(ring.len(), 8);
        assert_eq!(ring.iter().collect::<Vec<_>>(), (248..=255).collect::<Vec<u8>>());
    }

    #[test]
    fn insert_longer_than_capacity_keeps_tail() {
        let ring = filled(4, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn insert_onto_partial_buffer_evicts_existing() {
        let mut ring = filled(4, &[1, 2, 3]);
        ring.insert(&[4, 5, 6]);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let ring = filled(4, &[9, 8]);
        assert_eq!(ring.get(0), Some(9));
        assert_eq!(ring.get(1), Some(8));
        assert_eq!(ring.get(2), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_out_of_range_panics() {
        let ring = filled(4, &[9]);
        let _ = ring[1];
    }

    #[test]
    fn indexing_follows_head_across_wrap() {
        let mut ring = filled(4, &[1, 2, 3, 4]);
        ring.pop();
        ring.pop();
        ring.push(5);
        ring.push(6);

        assert_eq!((ring[0], ring[1], ring[2], ring[3]), (3, 4, 5, 6));
    }

    #[test]
    fn discard_drops_front() {
        let mut ring = filled(5, &[1, 2, 3, 4]);
        assert_eq!(ring.discard(2), 2);
        assert_eq!(ring.top(), Some(3));
        assert_eq!(ring.discard(10), 2);
        assert!(ring.is_empty());
    }

    #[test]
    fn copy_range_handles_wrap() {
        let mut ring = filled(5, &[1, 2, 3, 4, 5]);
        ring.discard(3);
        ring.insert(&[6, 7, 8]);

        let mut dst = [0u8; 4];
        assert_eq!(ring.copy_range(1, &mut dst), 4);
        assert_eq!(dst, [5, 6, 7, 8]);
    }

    #[test]
    fn copy_range_short_when_not_enough_data() {
        let ring = filled(5, &[1, 2, 3]);
        let mut dst = [0u8; 4];
        assert_eq!(ring.copy_range(1, &mut dst), 2);
        assert_eq!(&dst[..2], &[2, 3]);
        assert_eq!(ring.copy_range(7, &mut dst), 0);
    }

    #[test]
    fn clear_resets_state() {
        let mut ring = filled(3, &[1, 2, 3, 4]);
        ring.clear();
        assert!(ring.is_empty());
        ring.push(7);
        assert_eq!(ring.pop(), Some(7));
    }

    #[test]
    fn iterator_is_double_ended() {
        let ring = filled(4, &[1, 2, 3]);
        assert_eq!(ring.iter().rev().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(ring.iter().len(), 3);
        assert_eq!((&ring).into_iter().sum::<u8>(), 6);
    }
}
