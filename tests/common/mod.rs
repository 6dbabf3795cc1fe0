#![allow(dead_code)]

use heapmetrics::{CostSink, MaxHeap};

/// Extract until empty, returning values in extraction order.
pub fn drain<S: CostSink + ?Sized>(heap: &mut MaxHeap<'_, S>) -> Vec<i64> {
    let mut out = Vec::with_capacity(heap.len());
    while !heap.is_empty() {
        out.push(heap.extract_max().expect("non-empty heap yields a value"));
    }
    out
}

pub fn is_non_increasing(values: &[i64]) -> bool {
    values.windows(2).all(|pair| pair[0] >= pair[1])
}

pub fn sorted_desc(values: &[i64]) -> Vec<i64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}
