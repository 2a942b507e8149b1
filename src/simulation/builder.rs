/*!
 * Simulator Builder
 * Builder pattern for Simulator construction
 */

use super::config::SimConfig;
use super::{SimRng, Simulator};
use crate::core::errors::SimResult;
use crate::core::types::Size;
use crate::memory::{PartitionTable, DEFAULT_PARTITIONS};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

/// Builder for Simulator
pub struct SimulatorBuilder {
    partitions: Vec<Size>,
    config: SimConfig,
    seed: Option<u64>,
    rng: Option<SimRng>,
}

impl SimulatorBuilder {
    /// Create a new Simulator builder with the default layout and config
    pub fn new() -> Self {
        Self {
            partitions: DEFAULT_PARTITIONS.to_vec(),
            config: SimConfig::default(),
            seed: None,
            rng: None,
        }
    }

    /// Use a custom partition layout
    pub fn with_partitions(mut self, sizes: impl Into<Vec<Size>>) -> Self {
        self.partitions = sizes.into();
        self
    }

    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the default generator for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Inject a custom random source; takes precedence over a seed
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Validate the configuration and build the Simulator
    pub fn build(self) -> SimResult<Simulator> {
        self.config.validate()?;
        let memory = PartitionTable::new(&self.partitions)?;

        let rng: SimRng = match (self.rng, self.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(StdRng::seed_from_u64(seed)),
            (None, None) => Box::new(StdRng::from_entropy()),
        };

        info!(
            partitions = ?self.partitions,
            quantum = self.config.quantum,
            cpu_time = %self.config.cpu_time_range,
            block_probability = self.config.block_probability,
            io_time = %self.config.io_time_range,
            seed = ?self.seed,
            "Simulator initialized"
        );

        Ok(Simulator::from_parts(memory, self.config, rng))
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
