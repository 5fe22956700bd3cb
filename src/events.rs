//! Step Events & Observers
//!
//! Engines never touch presentation state. They report what happened as
//! [`StepEvent`]s carrying indices into the working sequence, and the
//! controller fans those out to registered [`StepObserver`]s.

use crate::engine::Algorithm;
use crate::playback::RunReport;
use crate::Value;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Discrete unit of visible algorithm progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepEvent {
    /// Two positions are being compared.
    Compare(usize, usize),
    /// Two positions are being exchanged.
    Swap(usize, usize),
    /// A position holds its final sorted value.
    Finalize(usize),
}

impl StepEvent {
    /// Indices touched by this event.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match *self {
            StepEvent::Compare(i, j) | StepEvent::Swap(i, j) => (i, Some(j)),
            StepEvent::Finalize(i) => (i, None),
        };
        std::iter::once(first).chain(second)
    }
}

/// Everything a subscriber can observe from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A run was accepted and is about to start.
    Started(Algorithm),
    /// An engine emitted a step.
    Step(StepEvent),
    /// The authoritative sequence was replaced with this snapshot.
    Snapshot(Vec<Value>),
    /// A run completed.
    Finished(RunReport),
    /// A fresh sequence was generated or loaded.
    Reset(Vec<Value>),
}

/// Receives playback notifications synchronously, in emission order.
///
/// Callbacks run on the task driving the sort, between two suspension
/// points, so they should return quickly.
pub trait StepObserver: Send + Sync {
    /// A step was emitted.
    fn on_step(&self, event: StepEvent);

    /// The authoritative sequence changed.
    fn on_snapshot(&self, _sequence: &[Value]) {}

    /// A run started.
    fn on_run_started(&self, _algorithm: Algorithm) {}

    /// A run finished.
    fn on_run_finished(&self, _report: &RunReport) {}

    /// The sequence was replaced while idle.
    fn on_reset(&self, _sequence: &[Value]) {}

    /// Whether this observer can no longer receive anything. Closed
    /// observers are dropped from the controller.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Observer forwarding every notification into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: UnboundedSender<PlaybackEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its stream.
    pub fn new() -> (Self, UnboundedReceiver<PlaybackEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelObserver { tx }, rx)
    }

    fn send(&self, event: PlaybackEvent) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.tx.send(event);
    }
}

impl StepObserver for ChannelObserver {
    fn on_step(&self, event: StepEvent) {
        self.send(PlaybackEvent::Step(event));
    }

    fn on_snapshot(&self, sequence: &[Value]) {
        self.send(PlaybackEvent::Snapshot(sequence.to_vec()));
    }

    fn on_run_started(&self, algorithm: Algorithm) {
        self.send(PlaybackEvent::Started(algorithm));
    }

    fn on_run_finished(&self, report: &RunReport) {
        self.send(PlaybackEvent::Finished(report.clone()));
    }

    fn on_reset(&self, sequence: &[Value]) {
        self.send(PlaybackEvent::Reset(sequence.to_vec()));
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Registered observers, shared between the controller and running engines.
#[derive(Default, Clone)]
pub(crate) struct ObserverSet {
    observers: Arc<RwLock<Vec<Arc<dyn StepObserver>>>>,
}

impl ObserverSet {
    pub(crate) fn add(&self, observer: Arc<dyn StepObserver>) {
        let mut observers = self.observers.write();
        observers.retain(|o| !o.is_closed());
        observers.push(observer);
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Drop observers that report themselves closed.
    pub(crate) fn prune(&self) -> usize {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|o| !o.is_closed());
        before - observers.len()
    }

    /// Call `f` on every observer. The list is copied first so callbacks may
    /// register new observers; those only see later notifications.
    pub(crate) fn for_each(&self, mut f: impl FnMut(&dyn StepObserver)) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            f(observer.as_ref());
        }
    }
}
