//! Merge sort (top-down)
//!
//! Runs are merged through temporary left/right buffers. Every write back
//! into the working sequence is published and settles for one step. No index
//! is finalized until the whole sequence is assembled.

use super::{StepFuture, StepSink};
use crate::Value;

pub(super) async fn sort(sink: &mut StepSink) {
    let n = sink.len();
    if n == 0 {
        return;
    }

    merge_sort(sink, 0, n - 1).await;
    for index in 0..n {
        sink.finalize(index).await;
    }
}

fn merge_sort(sink: &mut StepSink, l: usize, r: usize) -> StepFuture<'_> {
    Box::pin(async move {
        if l >= r {
            return;
        }
        let m = l + (r - l) / 2;
        merge_sort(sink, l, m).await;
        merge_sort(sink, m + 1, r).await;
        merge(sink, l, m, r).await;
    })
}

/// Merge the sorted runs `l..=m` and `m+1..=r`.
async fn merge(sink: &mut StepSink, l: usize, m: usize, r: usize) {
    let left: Vec<Value> = sink.values()[l..=m].to_vec();
    let right: Vec<Value> = sink.values()[m + 1..=r].to_vec();

    let (mut i, mut j, mut k) = (0, 0, l);
    while i < left.len() && j < right.len() {
        sink.compare(l + i, m + 1 + j).await;
        // Ties take from the left run.
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        sink.write(k, value).await;
        k += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        sink.write(k, value).await;
        k += 1;
    }
}
