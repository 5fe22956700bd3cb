//! Delay Policy
//!
//! Maps the user-facing speed setting (1..=100) onto a per-step delay.
//! Speed 1 waits 198 ms per step, speed 100 waits the 1 ms floor.

use std::fmt;
use std::time::Duration;

/// Slowest accepted speed setting.
pub const MIN_SPEED: u8 = 1;
/// Fastest accepted speed setting.
pub const MAX_SPEED: u8 = 100;
/// Speed used when nothing else is configured.
pub const DEFAULT_SPEED: u8 = 50;
/// Lower bound of any step delay in milliseconds.
pub const MIN_DELAY_MS: u64 = 1;

/// Compute the step delay in milliseconds for a speed value.
///
/// `delay = max(1, 200 - 2 * speed)`. Values outside 1..=100 are clamped first.
pub fn delay_ms(speed: u8) -> u64 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED) as u64;
    200u64.saturating_sub(2 * speed).max(MIN_DELAY_MS)
}

/// Speed setting clamped to 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    /// Create a speed setting, clamping into the accepted range.
    pub fn new(value: i64) -> Self {
        Speed(value.clamp(MIN_SPEED as i64, MAX_SPEED as i64) as u8)
    }

    /// Raw speed value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Delay applied to each step at this speed.
    pub fn delay(self) -> Duration {
        Duration::from_millis(delay_ms(self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(DEFAULT_SPEED)
    }
}

impl From<u8> for Speed {
    fn from(value: u8) -> Self {
        Speed::new(value as i64)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
