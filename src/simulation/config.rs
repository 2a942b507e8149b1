/*!
 * Simulation Configuration
 *
 * Scheduler and workload parameters, validated as a whole before use.
 */

use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{InclusiveRange, Size, Ticks};
use crate::memory::validate_layout;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scheduler and workload parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Ticks a process may hold the CPU before it can be preempted (default: 5)
    pub quantum: Ticks,

    /// CPU time drawn for new processes (default: 20-60)
    pub cpu_time_range: InclusiveRange<Ticks>,

    /// Chance, in percent, that the running process blocks on a tick (default: 20)
    pub block_probability: u32,

    /// Length of a simulated I/O burst (default: 3-8)
    pub io_time_range: InclusiveRange<Ticks>,

    /// Memory drawn for new processes (default: 1-12)
    pub memory_range: InclusiveRange<Size>,
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            quantum: 5,
            cpu_time_range: InclusiveRange::new(20, 60),
            block_probability: 20,
            io_time_range: InclusiveRange::new(3, 8),
            memory_range: InclusiveRange::new(1, 12),
        }
    }

    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_cpu_time_range(mut self, min: Ticks, max: Ticks) -> Self {
        self.cpu_time_range = InclusiveRange::new(min, max);
        self
    }

    pub fn with_block_probability(mut self, percent: u32) -> Self {
        self.block_probability = percent;
        self
    }

    pub fn with_io_time_range(mut self, min: Ticks, max: Ticks) -> Self {
        self.io_time_range = InclusiveRange::new(min, max);
        self
    }

    pub fn with_memory_range(mut self, min: Size, max: Size) -> Self {
        self.memory_range = InclusiveRange::new(min, max);
        self
    }

    /// Report the first rule this configuration breaks
    pub fn validate(&self) -> SimResult<()> {
        if self.quantum < 1 {
            return Err(ConfigError::InvalidQuantum(self.quantum));
        }

        let cpu = self.cpu_time_range;
        if cpu.min < 1 || cpu.min >= cpu.max {
            return Err(ConfigError::InvalidCpuRange {
                min: cpu.min,
                max: cpu.max,
            });
        }

        if self.block_probability > 100 {
            return Err(ConfigError::InvalidBlockProbability(self.block_probability));
        }

        let io = self.io_time_range;
        if io.min < 1 || io.min > io.max {
            return Err(ConfigError::InvalidIoRange {
                min: io.min,
                max: io.max,
            });
        }

        let memory = self.memory_range;
        if memory.min < 1 || memory.min > memory.max {
            return Err(ConfigError::InvalidMemoryRange {
                min: memory.min,
                max: memory.max,
            });
        }

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A reconfiguration request, committed all-or-nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub config: SimConfig,

    /// New partition layout; replacing it sends every live process back to
    /// the admission queue
    pub partitions: Option<Vec<Size>>,

    /// Redraw `cpu_remaining` for live processes from the new CPU range
    pub reapply_cpu_range: bool,
}

impl ConfigUpdate {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            partitions: None,
            reapply_cpu_range: false,
        }
    }

    pub fn with_partitions(mut self, sizes: Vec<Size>) -> Self {
        self.partitions = Some(sizes);
        self
    }

    pub fn reapply_cpu_range(mut self) -> Self {
        self.reapply_cpu_range = true;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        self.config.validate()?;
        if let Some(sizes) = &self.partitions {
            validate_layout(sizes)?;
        }
        Ok(())
    }
}

impl From<SimConfig> for ConfigUpdate {
    fn from(config: SimConfig) -> Self {
        Self::new(config)
    }
}

/// Wall-clock delay between automatic ticks
///
/// Only [`SimulationTask`](super::SimulationTask) reads it, so it is
/// validated on construction and applied through
/// `SimulationCommand::SetInterval` rather than as part of a
/// [`ConfigUpdate`]. An interval change never touches engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInterval(Duration);

impl TickInterval {
    pub const MIN_MILLIS: u64 = 10;
    pub const DEFAULT_MILLIS: u64 = 300;

    pub fn from_millis(ms: u64) -> SimResult<Self> {
        if ms < Self::MIN_MILLIS {
            return Err(ConfigError::InvalidTickInterval {
                got_ms: ms,
                min_ms: Self::MIN_MILLIS,
            });
        }
        Ok(Self(Duration::from_millis(ms)))
    }

    #[inline]
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    #[inline]
    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(Duration::from_millis(Self::DEFAULT_MILLIS))
    }
}
