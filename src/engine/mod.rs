//! Instrumented Sort Engines
//!
//! Each engine sorts a private working copy of the sequence through a
//! [`StepSink`]. The sink is the only way an engine reports progress: it
//! notifies observers, suspends on the [`StepEmitter`] and publishes a full
//! snapshot of the working sequence after every observable mutation.

mod exchange;
mod merge;
mod partition;

use crate::emitter::StepEmitter;
use crate::events::{ObserverSet, StepEvent};
use crate::{SortVizError, Value};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

/// Boxed future used by the recursive engines.
pub(crate) type StepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Sorting algorithm selectable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Bubble sort: adjacent compare-and-exchange passes.
    Exchange,
    /// Quick sort: Lomuto partition around the last element.
    Partition,
    /// Top-down merge sort.
    Merge,
}

impl Algorithm {
    /// All algorithms, in display order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Exchange, Algorithm::Partition, Algorithm::Merge];

    /// Short identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Exchange => "bubble",
            Algorithm::Partition => "quick",
            Algorithm::Merge => "merge",
        }
    }

    /// Static complexity metadata for display.
    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Algorithm::Exchange => &BUBBLE_INFO,
            Algorithm::Partition => &QUICK_INFO,
            Algorithm::Merge => &MERGE_INFO,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

impl FromStr for Algorithm {
    type Err = SortVizError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "bubble" | "exchange" => Ok(Algorithm::Exchange),
            "quick" | "partition" => Ok(Algorithm::Partition),
            "merge" => Ok(Algorithm::Merge),
            _ => Err(SortVizError::InvalidConfig(format!(
                "unknown algorithm '{}' (expected bubble, quick or merge)",
                value
            ))),
        }
    }
}

/// Asymptotic complexity strings shown next to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    /// Display name
    pub name: &'static str,
    /// Best-case time
    pub time_best: &'static str,
    /// Average-case time
    pub time_average: &'static str,
    /// Worst-case time
    pub time_worst: &'static str,
    /// Auxiliary space
    pub space: &'static str,
}

static BUBBLE_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    time_best: "O(n)",
    time_average: "O(n²)",
    time_worst: "O(n²)",
    space: "O(1)",
};

static QUICK_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Quick Sort",
    time_best: "O(n log n)",
    time_average: "O(n log n)",
    time_worst: "O(n²)",
    space: "O(log n)",
};

static MERGE_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Merge Sort",
    time_best: "O(n log n)",
    time_average: "O(n log n)",
    time_worst: "O(n log n)",
    space: "O(n)",
};

/// Per-run step counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StepCounts {
    pub compares: usize,
    pub swaps: usize,
    pub writes: usize,
    pub finalized: usize,
}

/// Emission sink owning the working sequence of one run.
pub(crate) struct StepSink {
    working: Vec<Value>,
    emitter: StepEmitter,
    observers: ObserverSet,
    authoritative: Arc<RwLock<Vec<Value>>>,
    counts: StepCounts,
}

impl StepSink {
    pub(crate) fn new(
        working: Vec<Value>,
        emitter: StepEmitter,
        observers: ObserverSet,
        authoritative: Arc<RwLock<Vec<Value>>>,
    ) -> Self {
        StepSink {
            working,
            emitter,
            observers,
            authoritative,
            counts: StepCounts::default(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.working.len()
    }

    pub(crate) fn value(&self, index: usize) -> Value {
        self.working[index]
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.working
    }

    pub(crate) fn counts(&self) -> StepCounts {
        self.counts
    }

    /// Report a comparison between `i` and `j`.
    pub(crate) async fn compare(&mut self, i: usize, j: usize) {
        self.counts.compares += 1;
        self.notify(StepEvent::Compare(i, j));
        self.emitter.await_step(|| ()).await;
    }

    /// Exchange `i` and `j` and publish the result. Self-swaps are skipped.
    pub(crate) async fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.counts.swaps += 1;
        self.notify(StepEvent::Swap(i, j));
        let emitter = self.emitter.clone();
        emitter
            .await_step(|| {
                self.working.swap(i, j);
                self.publish();
            })
            .await;
    }

    /// Mark `i` as holding its final value.
    pub(crate) async fn finalize(&mut self, i: usize) {
        self.counts.finalized += 1;
        self.notify(StepEvent::Finalize(i));
        self.emitter.await_step(|| ()).await;
    }

    /// Overwrite position `k`, publish, then settle for one step delay.
    pub(crate) async fn write(&mut self, k: usize, value: Value) {
        self.counts.writes += 1;
        self.working[k] = value;
        self.publish();
        self.emitter.await_step(|| ()).await;
    }

    fn notify(&self, event: StepEvent) {
        log::trace!("step {:?}", event);
        self.observers.for_each(|observer| observer.on_step(event));
    }

    fn publish(&self) {
        self.authoritative.write().clone_from(&self.working);
        self.observers
            .for_each(|observer| observer.on_snapshot(&self.working));
    }
}

/// Run `algorithm` to completion over the sink's working sequence.
pub(crate) async fn sort(algorithm: Algorithm, sink: &mut StepSink) {
    match algorithm {
        Algorithm::Exchange => exchange::sort(sink).await,
        Algorithm::Partition => partition::sort(sink).await,
        Algorithm::Merge => merge::sort(sink).await,
    }
}
