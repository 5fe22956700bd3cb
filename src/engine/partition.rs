//! Quick sort (Lomuto partition, last element as pivot)
//!
//! Ranges are half-open. Every pivot is finalized once it lands, and every
//! single-element range is finalized when it is reached, so each index is
//! finalized exactly once.

use super::{StepFuture, StepSink};

pub(super) async fn sort(sink: &mut StepSink) {
    let n = sink.len();
    quick_sort(sink, 0, n).await;
}

fn quick_sort(sink: &mut StepSink, low: usize, high: usize) -> StepFuture<'_> {
    Box::pin(async move {
        match high.saturating_sub(low) {
            0 => {}
            1 => sink.finalize(low).await,
            _ => {
                let pivot = partition(sink, low, high - 1).await;
                quick_sort(sink, low, pivot).await;
                quick_sort(sink, pivot + 1, high).await;
            }
        }
    })
}

/// Partition `low..=pivot_index` around the value at `pivot_index`.
/// Returns the pivot's final position.
async fn partition(sink: &mut StepSink, low: usize, pivot_index: usize) -> usize {
    let pivot = sink.value(pivot_index);
    // Next slot for a value smaller than the pivot.
    let mut store = low;

    for j in low..pivot_index {
        sink.compare(j, pivot_index).await;
        if sink.value(j) < pivot {
            sink.swap(store, j).await;
            store += 1;
        }
    }

    sink.swap(store, pivot_index).await;
    sink.finalize(store).await;
    store
}
