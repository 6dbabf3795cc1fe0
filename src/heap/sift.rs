//! Order-restoring passes over the heap buffer

use super::MaxHeap;
use crate::metrics::CostSink;

impl<S: CostSink + ?Sized> MaxHeap<'_, S> {
    /// Bottom-up heapify: sift down every non-leaf, last parent first.
    pub(super) fn build_heap(&mut self) {
        if self.size == 0 {
            return;
        }
        // `(size - 2) / 2` truncated, so a single element still gets one pass.
        let last_parent = self.size.saturating_sub(2) / 2;
        for index in (0..=last_parent).rev() {
            self.sift_down(index);
        }
    }

    /// Move the element at `index` towards the root while it beats its parent.
    pub(super) fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;

            self.sink.record_array_access(2);
            self.sink.record_comparison(1);
            if self.buf[parent] >= self.buf[index] {
                break;
            }

            self.exchange(parent, index);
            index = parent;
        }
    }

    /// Move the element at `index` towards the leaves while a child beats it.
    pub(super) fn sift_down(&mut self, mut index: usize) {
        while index < self.size {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut largest = index;

            self.sink.record_array_access(1);
            if left < self.size {
                self.sink.record_array_access(1);
                self.sink.record_comparison(1);
                if self.buf[left] > self.buf[largest] {
                    largest = left;
                }
            }

            if right < self.size {
                self.sink.record_array_access(1);
                self.sink.record_comparison(1);
                if self.buf[right] > self.buf[largest] {
                    largest = right;
                }
            }

            if largest == index {
                break;
            }

            self.exchange(index, largest);
            index = largest;
        }
    }

    fn exchange(&mut self, i: usize, j: usize) {
        self.buf.swap(i, j);
        self.sink.record_array_access(4);
        self.sink.record_swap(1);
    }
}

#[cfg(test)]
mod tests {
    use crate::heap::MaxHeap;
    use crate::metrics::{CounterSet, PerformanceTracker};

    #[test]
    fn sift_up_stops_at_larger_parent() {
        let tracker = PerformanceTracker::new();
        let mut heap = MaxHeap::from_slice(&[9, 3], &tracker);
        tracker.reset();

        heap.sift_up(1);
        assert_eq!(tracker.comparisons(), 1);
        assert_eq!(tracker.array_accesses(), 2);
        assert_eq!(tracker.swaps(), 0);
    }

    #[test]
    fn sift_down_on_leaf_reads_once() {
        let tracker = PerformanceTracker::new();
        let mut heap = MaxHeap::from_slice(&[9, 3, 1], &tracker);
        tracker.reset();

        heap.sift_down(2);
        assert_eq!(tracker.array_accesses(), 1);
        assert_eq!(tracker.comparisons(), 0);
    }

    #[test]
    fn single_element_build_runs_one_pass() {
        let tracker = PerformanceTracker::new();
        let heap = MaxHeap::from_slice(&[7], &tracker);
        assert_eq!(heap.as_slice(), &[7]);
        assert_eq!(tracker.array_accesses(), 1);
        assert_eq!(tracker.memory_allocations(), 8);
    }

    #[test]
    fn empty_build_touches_nothing() {
        let tracker = PerformanceTracker::new();
        let heap = MaxHeap::from_slice(&[], &tracker);
        assert!(heap.is_empty());
        assert_eq!(tracker.counters(), CounterSet::default());
    }

    #[test]
    fn exchange_charges_four_accesses() {
        let tracker = PerformanceTracker::new();
        let mut heap = MaxHeap::from_slice(&[2, 1], &tracker);
        tracker.reset();
        heap.exchange(0, 1);

        assert_eq!(heap.as_slice(), &[1, 2]);
        assert_eq!(tracker.array_accesses(), 4);
        assert_eq!(tracker.swaps(), 1);
    }
}
