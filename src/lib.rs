/*!
 * Partition Scheduler Simulator
 *
 * Tick-by-tick model of a round-robin CPU scheduler sharing a machine with
 * a fixed-partition, first-fit memory allocator:
 * - Admission queue for processes waiting on memory
 * - Ready queue and a single CPU with quantum-based preemption
 * - Randomized I/O blocking and completion
 * - Validate-then-commit reconfiguration, including destructive
 *   partition resets
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, SimResult};
pub use crate::core::types::{InclusiveRange, Pid, Size, Ticks};
pub use memory::{MemoryInfo, MemorySnapshot, MemoryStats, Partition, PartitionTable};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessSpec, ProcessState, StateKind};
pub use simulation::{
    shared, Admission, AdmissionOutcome, ConfigUpdate, QueueLengths, RunningSlot, Settings,
    SharedSimulator, SimConfig, SimulationCommand, SimulationSnapshot, SimulationTask, Simulator,
    SimulatorBuilder, SimulatorStats, TickInterval,
};
