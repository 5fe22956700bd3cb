//! Bubble sort
//!
//! Adjacent compare-and-exchange passes. Pass `i` bubbles the largest
//! unsorted value to position `n - i - 1`, which is finalized at the end of
//! the pass. Only a strict `>` exchanges, so equal values never move.

use super::StepSink;

pub(super) async fn sort(sink: &mut StepSink) {
    let n = sink.len();
    if n == 0 {
        return;
    }

    for i in 0..n - 1 {
        for j in 0..n - i - 1 {
            sink.compare(j, j + 1).await;
            if sink.value(j) > sink.value(j + 1) {
                sink.swap(j, j + 1).await;
            }
        }
        sink.finalize(n - i - 1).await;
    }
    // Whatever is left at the front is the minimum.
    sink.finalize(0).await;
}
