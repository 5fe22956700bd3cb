//! Visualizer Configuration
//!
//! Sequence size, value range and initial speed. Loadable from JSON; every
//! field is optional there and falls back to the defaults below.

use crate::delay::{Speed, DEFAULT_SPEED};
use crate::{Result, SortVizError, Value};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of values in a generated sequence
pub const DEFAULT_ARRAY_SIZE: usize = 50;

/// Smallest generated value (inclusive)
pub const DEFAULT_MIN_VALUE: Value = 10;

/// Largest generated value (inclusive)
pub const DEFAULT_MAX_VALUE: Value = 500;

/// Configuration for a playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Length of every generated sequence
    pub array_size: usize,

    /// Lower bound of generated values (inclusive)
    pub min_value: Value,

    /// Upper bound of generated values (inclusive)
    pub max_value: Value,

    /// Speed at startup (clamped to 1..=100)
    pub initial_speed: u8,

    /// Seed for reproducible sequences; `None` draws from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl VisualizerConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: VisualizerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("loaded visualizer config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Check that the value range is usable
    pub fn validate(&self) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(SortVizError::InvalidConfig(format!(
                "min_value {} is greater than max_value {}",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same configuration with a different sequence length
    pub fn with_array_size(mut self, array_size: usize) -> Self {
        self.array_size = array_size;
        self
    }

    /// Initial speed, clamped
    pub fn speed(&self) -> Speed {
        Speed::from(self.initial_speed)
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        VisualizerConfig {
            array_size: DEFAULT_ARRAY_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            initial_speed: DEFAULT_SPEED,
            seed: None,
        }
    }
}
