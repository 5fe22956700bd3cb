//! Sort Playback Engine
//!
//! Runs comparison sorts over an in-memory sequence of integers while
//! emitting a timed stream of discrete steps (compare, swap, finalize).
//! Each step is delayed according to a user-facing speed setting so a
//! presentation layer can animate the algorithm as it progresses.
//!
//! # Features
//! - Three instrumented engines: bubble (exchange), quick (Lomuto partition), merge (top-down)
//! - Speed-driven step delay (1..=100, 198 ms down to 1 ms)
//! - Cooperative suspension on the tokio timer, one run in flight at a time
//! - Full-array snapshots published after every observable mutation
//! - Marker board (comparing / swapping / sorted) maintained from step events
//! - Static algorithm metadata for display
//!
//! # Crate feature flags
//! - `visualization` (default): Terminal bar rendering helpers (`visualization`)
//! - `cli` (default): The `sortviz` command-line demo (enables `clap` + `env_logger`)
//!
//! # Quick start
//! ```no_run
//! use sortviz::{Algorithm, PlaybackController, VisualizerConfig};
//!
//! # async fn demo() -> sortviz::Result<()> {
//! let controller = PlaybackController::new(VisualizerConfig::default())?;
//! controller.set_speed(100);
//! let mut events = controller.subscribe();
//! let report = controller.run(Algorithm::Merge).await?;
//! assert_eq!(report.finalized, controller.sequence().len());
//! while let Ok(event) = events.try_recv() {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config; // Visualizer Configuration
pub mod delay; // Speed -> Delay Policy
pub mod emitter; // Step Suspension
pub mod engine; // Instrumented Sort Engines
pub mod events; // Step Events & Observers
pub mod markers; // Marker Board
pub mod playback; // Playback Controller
#[cfg(feature = "visualization")]
pub mod visualization; // Terminal UI Helpers

/// Element type of the sorted sequence.
pub type Value = i32;

/// Error types for playback operations
#[derive(thiserror::Error, Debug)]
pub enum SortVizError {
    /// A run is already in flight; the request was dropped
    #[error("A sort run is already in progress")]
    RunInProgress,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, SortVizError>;

// Public API exports
pub use config::VisualizerConfig;
pub use delay::{delay_ms, Speed};
pub use emitter::StepEmitter;
pub use engine::{Algorithm, AlgorithmInfo};
pub use events::{ChannelObserver, PlaybackEvent, StepEvent, StepObserver};
pub use markers::{Marker, MarkerBoard};
pub use playback::{PlaybackController, RunReport, RunState};
#[cfg(feature = "visualization")]
pub use visualization::{create_bar_chart, create_info_line, create_status_line};
