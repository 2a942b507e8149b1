/*!
 * Simulation Engine
 *
 * Round-robin CPU scheduling over fixed-partition, first-fit memory,
 * advanced one discrete tick at a time.
 */

use crate::memory::PartitionTable;
use crate::process::ProcessTable;
use rand::RngCore;
use std::fmt;

mod builder;
mod config;
mod operations;
mod queues;
mod reconfigure;
mod settings;
mod stats;
mod task;

pub use builder::SimulatorBuilder;
pub use config::{ConfigUpdate, SimConfig, TickInterval};
pub use operations::{Admission, AdmissionOutcome};
pub use queues::{QueueLengths, RunQueues, RunningSlot};
pub use settings::Settings;
pub use stats::{SimulationSnapshot, SimulatorStats};
pub use task::{shared, SharedSimulator, SimulationCommand, SimulationTask};

/// Random source driving every randomized decision
pub type SimRng = Box<dyn RngCore + Send>;

/// Simulator state
///
/// Single owner of the partition table, every process record and the run
/// queues. `add_process` and `step` are the only regular mutators; each
/// runs to completion. Share it across threads through [`SharedSimulator`].
pub struct Simulator {
    memory: PartitionTable,
    processes: ProcessTable,
    queues: RunQueues,
    config: SimConfig,
    rng: SimRng,
    stats: SimulatorStats,
}

impl Simulator {
    /// Start building a simulator
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub(crate) fn from_parts(memory: PartitionTable, config: SimConfig, rng: SimRng) -> Self {
        Self {
            memory,
            processes: ProcessTable::new(),
            queues: RunQueues::new(),
            config,
            rng,
            stats: SimulatorStats::default(),
        }
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("memory", &self.memory)
            .field("processes", &self.processes.len())
            .field("queues", &self.queues)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
