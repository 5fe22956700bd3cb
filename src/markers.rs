//! Marker Board
//!
//! Per-index display markers derived from the step stream. `COMPARING` and
//! `SWAPPING` are transient: they belong to the most recent step only and are
//! cleared at exactly the indices that step set. `SORTED` is permanent until
//! the board is cleared.

use crate::events::{StepEvent, StepObserver};
use bitflags::bitflags;
use parking_lot::Mutex;
use std::sync::Arc;

bitflags! {
    /// Display markers for a single position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Marker: u8 {
        /// Part of the current comparison.
        const COMPARING = 0b0000_0001;
        /// Part of the current exchange.
        const SWAPPING = 0b0000_0010;
        /// Holds its final value.
        const SORTED = 0b0000_0100;
    }
}

const TRANSIENT: Marker = Marker::COMPARING.union(Marker::SWAPPING);

/// Marker state for every position of the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerBoard {
    markers: Vec<Marker>,
    /// Positions touched by the last transient step.
    active: Vec<usize>,
}

impl MarkerBoard {
    /// Create a board for `len` positions with no markers set.
    pub fn new(len: usize) -> Self {
        MarkerBoard {
            markers: vec![Marker::empty(); len],
            active: Vec::with_capacity(2),
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the board covers no positions.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers at `index` (empty when out of range).
    pub fn get(&self, index: usize) -> Marker {
        self.markers.get(index).copied().unwrap_or_default()
    }

    /// All markers in index order.
    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    /// Positions currently marked sorted.
    pub fn sorted_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|m| m.contains(Marker::SORTED))
            .count()
    }

    /// Apply a step: clear the previous transient markers, then set the new ones.
    pub fn apply(&mut self, event: StepEvent) {
        self.clear_transient();
        match event {
            StepEvent::Compare(i, j) => self.mark_transient(&[i, j], Marker::COMPARING),
            StepEvent::Swap(i, j) => self.mark_transient(&[i, j], Marker::SWAPPING),
            StepEvent::Finalize(i) => {
                if let Some(m) = self.markers.get_mut(i) {
                    m.insert(Marker::SORTED);
                }
            }
        }
    }

    /// Remove transient markers left by the last step.
    pub fn clear_transient(&mut self) {
        for index in self.active.drain(..) {
            if let Some(m) = self.markers.get_mut(index) {
                m.remove(TRANSIENT);
            }
        }
    }

    /// Remove every marker and resize to `len` positions.
    pub fn reset(&mut self, len: usize) {
        self.markers.clear();
        self.markers.resize(len, Marker::empty());
        self.active.clear();
    }

    fn mark_transient(&mut self, indices: &[usize], marker: Marker) {
        for &index in indices {
            if let Some(m) = self.markers.get_mut(index) {
                m.insert(marker);
                self.active.push(index);
            }
        }
    }
}

/// Observer keeping a shared [`MarkerBoard`] in step with the event stream.
#[derive(Debug, Clone, Default)]
pub(crate) struct MarkerTracker {
    board: Arc<Mutex<MarkerBoard>>,
}

impl MarkerTracker {
    pub(crate) fn snapshot(&self) -> MarkerBoard {
        self.board.lock().clone()
    }

    pub(crate) fn reset(&self, len: usize) {
        self.board.lock().reset(len);
    }

    pub(crate) fn clear_transient(&self) {
        self.board.lock().clear_transient();
    }
}

impl StepObserver for MarkerTracker {
    fn on_step(&self, event: StepEvent) {
        self.board.lock().apply(event);
    }
}
