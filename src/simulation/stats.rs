/*!
 * Simulator Statistics
 * Counters, read-only accessors, and serializable snapshots
 */

use super::config::SimConfig;
use super::queues::{QueueLengths, RunningSlot};
use super::Simulator;
use crate::core::types::Pid;
use crate::memory::{MemoryInfo, MemorySnapshot, MemoryStats, PartitionTable};
use crate::process::{Process, StateKind};
use serde::{Deserialize, Serialize};

/// Cumulative event counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorStats {
    pub ticks: u64,
    pub processes_created: u64,
    pub processes_admitted: u64,
    pub processes_completed: u64,
    /// Dispatches onto the CPU
    pub context_switches: u64,
    pub preemptions: u64,
    pub blocks: u64,
    pub io_completions: u64,
    pub partition_resets: u64,
}

/// Everything a renderer needs, copied out in one go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub config: SimConfig,
    pub memory: MemorySnapshot,
    pub processes: Vec<Process>,
    pub waiting: Vec<Pid>,
    pub ready: Vec<Pid>,
    pub blocked: Vec<Pid>,
    pub running: Option<RunningSlot>,
    pub stats: SimulatorStats,
}

impl SimulationSnapshot {
    /// Number of processes currently in `kind`
    pub fn count(&self, kind: StateKind) -> usize {
        self.processes
            .iter()
            .filter(|p| p.state().kind() == kind)
            .count()
    }
}

impl Simulator {
    /// Get simulator statistics
    pub fn stats(&self) -> SimulatorStats {
        self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Every process ever created, in pid order
    pub fn processes(&self) -> impl ExactSizeIterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(pid)
    }

    pub fn partition_table(&self) -> &PartitionTable {
        &self.memory
    }

    pub fn memory(&self) -> MemorySnapshot {
        self.memory.snapshot()
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.memory.stats()
    }

    pub fn queue_lengths(&self) -> QueueLengths {
        self.queues.lengths()
    }

    pub fn running(&self) -> Option<RunningSlot> {
        self.queues.running()
    }

    pub fn waiting_queue(&self) -> impl ExactSizeIterator<Item = Pid> + '_ {
        self.queues.waiting()
    }

    pub fn ready_queue(&self) -> impl ExactSizeIterator<Item = Pid> + '_ {
        self.queues.ready()
    }

    pub fn blocked_set(&self) -> impl ExactSizeIterator<Item = Pid> + '_ {
        self.queues.blocked()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            config: self.config,
            memory: self.memory.snapshot(),
            processes: self.processes.iter().cloned().collect(),
            waiting: self.queues.waiting().collect(),
            ready: self.queues.ready().collect(),
            blocked: self.queues.blocked().collect(),
            running: self.queues.running(),
            stats: self.stats,
        }
    }
}
