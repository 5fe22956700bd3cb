//! Playback Controller
//!
//! Owns the authoritative sequence, the run state and the speed setting.
//! A run duplicates the authoritative sequence into a working copy, hands it
//! to the selected engine and awaits completion. Only one run may be in
//! flight; a second request while running is rejected without side effects.
//!
//! # Example
//!
//! ```no_run
//! use sortviz::{Algorithm, PlaybackController, VisualizerConfig};
//!
//! # async fn demo() -> sortviz::Result<()> {
//! let controller = PlaybackController::new(VisualizerConfig::default().with_seed(3))?;
//! controller.set_speed(80);
//! controller.run(Algorithm::Partition).await?;
//! controller.reset()?;
//! # Ok(())
//! # }
//! ```

pub mod generator;

pub use generator::SequenceGenerator;

use crate::config::VisualizerConfig;
use crate::delay::Speed;
use crate::emitter::StepEmitter;
use crate::engine::{self, Algorithm, StepSink};
use crate::events::{ChannelObserver, ObserverSet, PlaybackEvent, StepObserver};
use crate::markers::{MarkerBoard, MarkerTracker};
use crate::{Result, SortVizError, Value};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Whether a sort is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RunState {
    /// Ready to accept `run`, `reset` and `load_sequence`.
    #[default]
    Idle,
    /// A sort is in progress.
    Running,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Engine that ran
    pub algorithm: Algorithm,
    /// Sequence length
    pub len: usize,
    /// Compare steps emitted
    pub compares: usize,
    /// Swap steps emitted
    pub swaps: usize,
    /// Merge writes published
    pub writes: usize,
    /// Finalize steps emitted
    pub finalized: usize,
}

#[derive(Debug, Default)]
struct ControllerState {
    run_state: RunState,
    selected: Option<Algorithm>,
}

struct Inner {
    config: VisualizerConfig,
    state: Mutex<ControllerState>,
    sequence: Arc<RwLock<Vec<Value>>>,
    generator: Mutex<SequenceGenerator>,
    emitter: StepEmitter,
    observers: ObserverSet,
    markers: MarkerTracker,
}

/// Clears transient markers and releases the running flag when dropped,
/// including when the run future is dropped mid-run.
struct RunGuard<'a> {
    inner: &'a Inner,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.inner.markers.clear_transient();
        self.inner.state.lock().run_state = RunState::Idle;
    }
}

/// Handle to a playback controller. Clones share the same state.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Inner>,
}

impl PlaybackController {
    /// Create a controller with a freshly generated sequence.
    pub fn new(config: VisualizerConfig) -> Result<Self> {
        config.validate()?;
        let mut generator = SequenceGenerator::new(&config);
        let sequence = generator.generate();
        Ok(Self::build(config, generator, sequence))
    }

    /// Create a controller over a caller-supplied sequence.
    pub fn with_sequence(config: VisualizerConfig, sequence: Vec<Value>) -> Result<Self> {
        config.validate()?;
        let generator = SequenceGenerator::new(&config);
        Ok(Self::build(config, generator, sequence))
    }

    fn build(config: VisualizerConfig, generator: SequenceGenerator, sequence: Vec<Value>) -> Self {
        let markers = MarkerTracker::default();
        markers.reset(sequence.len());
        let observers = ObserverSet::default();
        observers.add(Arc::new(markers.clone()));

        PlaybackController {
            inner: Arc::new(Inner {
                emitter: StepEmitter::new(config.speed()),
                config,
                state: Mutex::new(ControllerState::default()),
                sequence: Arc::new(RwLock::new(sequence)),
                generator: Mutex::new(generator),
                observers,
                markers,
            }),
        }
    }

    /// Sort the authoritative sequence with `algorithm`, animating every step.
    ///
    /// Returns [`SortVizError::RunInProgress`] without touching any state if
    /// another run is in flight.
    pub async fn run(&self, algorithm: Algorithm) -> Result<RunReport> {
        let guard = self.begin_run(algorithm)?;
        let inner = &*self.inner;

        let working = inner.sequence.read().clone();
        log::info!(
            "{} started on {} values at speed {}",
            algorithm,
            working.len(),
            inner.emitter.speed()
        );
        inner
            .observers
            .for_each(|observer| observer.on_run_started(algorithm));

        let mut sink = StepSink::new(
            working,
            inner.emitter.clone(),
            inner.observers.clone(),
            Arc::clone(&inner.sequence),
        );
        engine::sort(algorithm, &mut sink).await;

        let counts = sink.counts();
        let report = RunReport {
            algorithm,
            len: sink.len(),
            compares: counts.compares,
            swaps: counts.swaps,
            writes: counts.writes,
            finalized: counts.finalized,
        };
        drop(guard);

        log::info!(
            "{} finished: {} compares, {} swaps, {} writes",
            algorithm,
            report.compares,
            report.swaps,
            report.writes
        );
        inner
            .observers
            .for_each(|observer| observer.on_run_finished(&report));
        let pruned = inner.observers.prune();
        if pruned > 0 {
            log::debug!("dropped {} closed observers", pruned);
        }
        Ok(report)
    }

    /// Replace the sequence with a freshly generated one and clear all markers.
    ///
    /// Keeps the selected algorithm and the speed setting.
    pub fn reset(&self) -> Result<()> {
        let inner = &*self.inner;
        let sequence = {
            let state = inner.state.lock();
            if state.run_state == RunState::Running {
                log::debug!("reset rejected: run in progress");
                return Err(SortVizError::RunInProgress);
            }
            let sequence = inner.generator.lock().generate();
            self.replace_sequence(sequence.clone());
            sequence
        };
        log::info!("sequence reset ({} values)", sequence.len());
        inner
            .observers
            .for_each(|observer| observer.on_reset(&sequence));
        Ok(())
    }

    /// Replace the sequence with `values` and clear all markers.
    pub fn load_sequence(&self, values: Vec<Value>) -> Result<()> {
        let inner = &*self.inner;
        {
            let state = inner.state.lock();
            if state.run_state == RunState::Running {
                log::debug!("load rejected: run in progress");
                return Err(SortVizError::RunInProgress);
            }
            self.replace_sequence(values.clone());
        }
        inner
            .observers
            .for_each(|observer| observer.on_reset(&values));
        Ok(())
    }

    /// Set the speed (clamped to 1..=100). Allowed while running; affects
    /// only steps that have not started waiting yet.
    pub fn set_speed(&self, value: i64) -> Speed {
        let speed = Speed::new(value);
        self.inner.emitter.set_speed(speed);
        log::debug!("speed set to {} ({:?} per step)", speed, speed.delay());
        speed
    }

    /// Current speed setting.
    pub fn speed(&self) -> Speed {
        self.inner.emitter.speed()
    }

    /// Snapshot of the authoritative sequence.
    pub fn sequence(&self) -> Vec<Value> {
        self.inner.sequence.read().clone()
    }

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        self.inner.state.lock().run_state
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// Algorithm of the most recent accepted run.
    pub fn selected_algorithm(&self) -> Option<Algorithm> {
        self.inner.state.lock().selected
    }

    /// Snapshot of the display markers.
    pub fn markers(&self) -> MarkerBoard {
        self.inner.markers.snapshot()
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &VisualizerConfig {
        &self.inner.config
    }

    /// Register an observer for all future notifications.
    pub fn add_observer(&self, observer: Arc<dyn StepObserver>) {
        self.inner.observers.add(observer);
        log::debug!("{} observers registered", self.inner.observers.len());
    }

    /// Stream of all future notifications.
    pub fn subscribe(&self) -> UnboundedReceiver<PlaybackEvent> {
        let (observer, rx) = ChannelObserver::new();
        self.add_observer(Arc::new(observer));
        rx
    }

    fn begin_run(&self, algorithm: Algorithm) -> Result<RunGuard<'_>> {
        let mut state = self.inner.state.lock();
        if state.run_state == RunState::Running {
            log::debug!("run of {} rejected: run in progress", algorithm);
            return Err(SortVizError::RunInProgress);
        }
        state.run_state = RunState::Running;
        state.selected = Some(algorithm);
        Ok(RunGuard { inner: &self.inner })
    }

    fn replace_sequence(&self, values: Vec<Value>) {
        self.inner.markers.reset(values.len());
        *self.inner.sequence.write() = values;
    }
}
