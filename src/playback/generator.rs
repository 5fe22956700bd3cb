//! Random sequence generation
//!
//! Draws values uniformly from the configured inclusive range. A seeded
//! configuration always produces the same series of sequences.

use crate::config::VisualizerConfig;
use crate::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces fresh sequences for `reset()`.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    rng: StdRng,
    len: usize,
    min: Value,
    max: Value,
}

impl SequenceGenerator {
    /// Create a generator from a validated configuration.
    pub fn new(config: &VisualizerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        SequenceGenerator {
            rng,
            len: config.array_size,
            min: config.min_value,
            max: config.max_value,
        }
    }

    /// Length of every generated sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether generated sequences are empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Generate the next sequence.
    pub fn generate(&mut self) -> Vec<Value> {
        (0..self.len)
            .map(|_| self.rng.random_range(self.min..=self.max))
            .collect()
    }
}
