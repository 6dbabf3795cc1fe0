//! Instrumented binary max-heap
//!
//! Array-backed, 0-indexed: the parent of `i` is `(i - 1) / 2`, its children
//! are `2i + 1` and `2i + 2`. Every read, write, comparison and exchange the
//! algorithms perform is reported to the bound [`CostSink`].
//!
//! ## Accounting rules
//!
//! - sift-up step: 2 accesses + 1 comparison, plus 4 accesses + 1 swap when
//!   the element moves
//! - sift-down step: 1 access for the current element, 1 access + 1
//!   comparison per existing child, plus 4 accesses + 1 swap when it moves
//! - `extract_max` charges one swap for moving the last element into the
//!   root. This is charged even when the following sift-down performs no
//!   exchange, and sift-down still charges its own exchanges on top. This is
//!   a fixed accounting rule, not an off-by-one.
//! - allocation events are `capacity * WORD_SIZE` bytes at construction and
//!   at every growth step; superseded buffers are not credited back.

mod sift;

use thiserror::Error;

use crate::metrics::{CostSink, PerformanceTracker};

/// Bytes per stored element.
pub const WORD_SIZE: usize = std::mem::size_of::<i64>();

/// Errors surfaced by heap operations.
///
/// Every error is detected before the heap is mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// Extraction attempted on an empty heap.
    #[error("heap is empty")]
    EmptyCollection,

    /// Index outside the occupied region `[0, size)`.
    #[error("index {index} out of range for heap of size {size}")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Heap size at the time of the call
        size: usize,
    },

    /// Argument rejected by the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Max-heap of `i64` values bound to a cost sink.
///
/// The heap owns its buffer; the sink is borrowed for the heap's lifetime.
/// `buf.len()` is the capacity and `size` the number of occupied slots.
#[derive(Debug)]
pub struct MaxHeap<'s, S: CostSink + ?Sized = PerformanceTracker> {
    buf: Vec<i64>,
    size: usize,
    sink: &'s S,
}

fn bytes_for(slots: usize) -> u64 {
    (slots * WORD_SIZE) as u64
}

impl<'s, S: CostSink + ?Sized> MaxHeap<'s, S> {
    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, sink: &'s S) -> Self {
        sink.record_memory_allocation(bytes_for(capacity));
        Self {
            buf: vec![0; capacity],
            size: 0,
            sink,
        }
    }

    /// Copy `values` and restore the heap property bottom-up in O(n).
    ///
    /// Capacity and size both equal `values.len()`.
    pub fn from_slice(values: &[i64], sink: &'s S) -> Self {
        sink.record_memory_allocation(bytes_for(values.len()));
        let mut heap = Self {
            buf: values.to_vec(),
            size: values.len(),
            sink,
        };
        heap.build_heap();
        heap
    }

    /// Add `value`, doubling the buffer first when it is full.
    pub fn insert(&mut self, value: i64) {
        if self.size == self.buf.len() {
            self.grow();
        }

        self.buf[self.size] = value;
        self.sink.record_array_access(1);
        self.size += 1;
        self.sift_up(self.size - 1);
    }

    /// Remove and return the largest value.
    pub fn extract_max(&mut self) -> Result<i64, HeapError> {
        if self.size == 0 {
            return Err(HeapError::EmptyCollection);
        }

        let max = self.buf[0];
        self.sink.record_array_access(1);

        let last = self.size - 1;
        self.buf[0] = self.buf[last];
        self.sink.record_array_access(2);
        self.size = last;

        if self.size > 0 {
            self.sift_down(0);
        }

        // Root replacement, see module docs.
        self.sink.record_swap(1);
        Ok(max)
    }

    /// Raise the value at `index` to `new_value` and restore order upwards.
    ///
    /// Decreasing a key is refused with [`HeapError::InvalidArgument`]; the
    /// read of the current value is still charged.
    pub fn increase_key(&mut self, index: usize, new_value: i64) -> Result<(), HeapError> {
        if index >= self.size {
            return Err(HeapError::OutOfRange {
                index,
                size: self.size,
            });
        }

        let current = self.buf[index];
        self.sink.record_array_access(1);
        if new_value < current {
            return Err(HeapError::InvalidArgument(format!(
                "new value {new_value} is less than current value {current} at index {index}"
            )));
        }

        self.buf[index] = new_value;
        self.sink.record_array_access(1);
        self.sift_up(index);
        Ok(())
    }

    /// Largest value without removing it. Not instrumented.
    pub fn peek(&self) -> Option<i64> {
        self.as_slice().first().copied()
    }

    /// `true` when no elements are stored
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.size
    }

    /// Allocated slots
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Occupied region in heap order. Not instrumented.
    pub fn as_slice(&self) -> &[i64] {
        &self.buf[..self.size]
    }

    /// Sink this heap reports to
    pub fn sink(&self) -> &'s S {
        self.sink
    }

    /// Check every node against both children. Not instrumented.
    pub fn is_valid_max_heap(&self) -> bool {
        let occupied = self.as_slice();
        (0..occupied.len()).all(|i| {
            let (left, right) = (2 * i + 1, 2 * i + 2);
            occupied.get(left).map_or(true, |&child| occupied[i] >= child)
                && occupied.get(right).map_or(true, |&child| occupied[i] >= child)
        })
    }

    fn grow(&mut self) {
        let new_capacity = (self.buf.len() * 2).max(1);
        self.buf.resize(new_capacity, 0);
        self.sink.record_memory_allocation(bytes_for(new_capacity));
        tracing::debug!(size = self.size, new_capacity, "heap buffer grown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NoopSink;

    fn drain<S: CostSink + ?Sized>(heap: &mut MaxHeap<'_, S>) -> Vec<i64> {
        let mut out = Vec::with_capacity(heap.len());
        while let Ok(value) = heap.extract_max() {
            out.push(value);
        }
        out
    }

    #[test]
    fn empty_heap() {
        let mut heap = MaxHeap::with_capacity(10, &NoopSink);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.capacity(), 10);
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.extract_max(), Err(HeapError::EmptyCollection));
    }

    #[test]
    fn single_element() {
        let mut heap = MaxHeap::with_capacity(10, &NoopSink);
        heap.insert(42);

        assert!(!heap.is_empty());
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.extract_max(), Ok(42));
        assert!(heap.is_empty());
    }

    #[test]
    fn build_from_slice() {
        let mut heap = MaxHeap::from_slice(&[3, 1, 4, 1, 5, 9, 2, 6], &NoopSink);
        assert!(heap.is_valid_max_heap());
        assert_eq!(heap.len(), 8);
        assert_eq!(heap.capacity(), 8);
        assert_eq!(heap.peek(), Some(9));
        assert_eq!(drain(&mut heap), vec![9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[test]
    fn increase_key_moves_to_root() {
        let mut heap = MaxHeap::from_slice(&[1, 2, 3, 4, 5], &NoopSink);
        heap.increase_key(4, 10).unwrap();
        assert!(heap.is_valid_max_heap());
        assert_eq!(heap.extract_max(), Ok(10));
        assert!(heap.is_valid_max_heap());
    }

    #[test]
    fn increase_key_to_same_value_is_allowed() {
        let mut heap = MaxHeap::from_slice(&[10, 8, 5], &NoopSink);
        heap.increase_key(2, 5).unwrap();
        assert_eq!(heap.as_slice(), &[10, 8, 5]);
    }

    #[test]
    fn decrease_is_rejected() {
        let mut heap = MaxHeap::from_slice(&[10, 8, 5], &NoopSink);
        let before = heap.as_slice().to_vec();

        assert!(matches!(
            heap.increase_key(0, 5),
            Err(HeapError::InvalidArgument(_))
        ));
        assert_eq!(heap.as_slice(), before.as_slice());
        assert!(heap.is_valid_max_heap());
    }

    #[test]
    fn out_of_range_index() {
        let mut heap = MaxHeap::from_slice(&[10, 8, 5], &NoopSink);
        assert_eq!(
            heap.increase_key(3, 100),
            Err(HeapError::OutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn duplicates() {
        let mut heap = MaxHeap::from_slice(&[5, 5, 5, 5, 5], &NoopSink);
        assert!(heap.is_valid_max_heap());
        assert_eq!(drain(&mut heap), vec![5; 5]);
    }

    #[test]
    fn zero_capacity_grows_to_one() {
        let mut heap = MaxHeap::with_capacity(0, &NoopSink);
        heap.insert(1);
        assert_eq!(heap.capacity(), 1);
        heap.insert(2);
        assert_eq!(heap.capacity(), 2);
        heap.insert(3);
        assert_eq!(heap.capacity(), 4);
        assert_eq!(drain(&mut heap), vec![3, 2, 1]);
    }

    #[test]
    fn large_ascending_input() {
        let values: Vec<i64> = (0..1000).collect();
        let mut heap = MaxHeap::from_slice(&values, &NoopSink);
        assert!(heap.is_valid_max_heap());
        for expected in (0..1000).rev() {
            assert_eq!(heap.extract_max(), Ok(expected));
        }
    }

    #[test]
    fn reports_through_trait_object() {
        let tracker = PerformanceTracker::new();
        let sink: &dyn CostSink = &tracker;
        let mut heap = MaxHeap::with_capacity(2, sink);
        heap.insert(3);
        heap.insert(9);

        assert_eq!(heap.peek(), Some(9));
        assert_eq!(tracker.swaps(), 1);
        assert_eq!(tracker.comparisons(), 1);
    }

    #[test]
    fn validity_check_detects_violation() {
        let mut heap = MaxHeap::from_slice(&[9, 4, 7], &NoopSink);
        heap.buf[2] = 20;
        assert!(!heap.is_valid_max_heap());
    }
}
