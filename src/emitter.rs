//! Step Emitter
//!
//! The single suspension point of a run. Each call waits for the delay
//! derived from the *current* speed, then hands control back to the engine.
//! Only the awaiting run is suspended; the runtime keeps serving other tasks.

use crate::delay::{Speed, DEFAULT_SPEED};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Suspends a run between steps using the shared speed setting.
#[derive(Debug, Clone)]
pub struct StepEmitter {
    speed: Arc<AtomicU8>,
}

impl StepEmitter {
    /// Create an emitter with its own speed cell.
    pub fn new(speed: Speed) -> Self {
        StepEmitter {
            speed: Arc::new(AtomicU8::new(speed.get())),
        }
    }

    /// Current speed setting.
    pub fn speed(&self) -> Speed {
        Speed::from(self.speed.load(Ordering::Relaxed))
    }

    /// Change the speed. Steps already sleeping keep their delay.
    pub fn set_speed(&self, speed: Speed) {
        self.speed.store(speed.get(), Ordering::Relaxed);
    }

    /// Delay the next step will wait for.
    pub fn current_delay(&self) -> Duration {
        self.speed().delay()
    }

    /// Wait one step delay, then run `on_resume` before returning to the caller.
    pub async fn await_step<R>(&self, on_resume: impl FnOnce() -> R) -> R {
        tokio::time::sleep(self.current_delay()).await;
        on_resume()
    }
}

impl Default for StepEmitter {
    fn default() -> Self {
        Self::new(Speed::from(DEFAULT_SPEED))
    }
}
