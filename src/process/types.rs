/*!
 * Process Types
 * Process records and their scheduling state
 */

use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{InclusiveRange, Pid, Size, Ticks};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
///
/// The partition index lives inside the states that own one, so a process
/// can never be Ready, Running or Blocked without memory, nor hold memory
/// while waiting for it or after it terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProcessState {
    /// Queued for admission; owns no memory yet
    WaitingForMemory,
    /// Admitted and queued for the CPU
    Ready { partition: usize },
    /// Holding the CPU
    Running { partition: usize },
    /// Waiting for simulated I/O to complete
    Blocked { partition: usize, io_remaining: Ticks },
    /// Finished; memory released
    Terminated,
}

impl ProcessState {
    #[inline]
    pub const fn partition(&self) -> Option<usize> {
        match *self {
            ProcessState::Ready { partition }
            | ProcessState::Running { partition }
            | ProcessState::Blocked { partition, .. } => Some(partition),
            ProcessState::WaitingForMemory | ProcessState::Terminated => None,
        }
    }

    #[inline]
    pub const fn io_remaining(&self) -> Ticks {
        match *self {
            ProcessState::Blocked { io_remaining, .. } => io_remaining,
            _ => 0,
        }
    }

    #[inline]
    pub const fn kind(&self) -> StateKind {
        match self {
            ProcessState::WaitingForMemory => StateKind::WaitingForMemory,
            ProcessState::Ready { .. } => StateKind::Ready,
            ProcessState::Running { .. } => StateKind::Running,
            ProcessState::Blocked { .. } => StateKind::Blocked,
            ProcessState::Terminated => StateKind::Terminated,
        }
    }
}

/// State tag without payload, for counting and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    WaitingForMemory,
    Ready,
    Running,
    Blocked,
    Terminated,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StateKind::WaitingForMemory => "waiting-for-memory",
            StateKind::Ready => "ready",
            StateKind::Running => "running",
            StateKind::Blocked => "blocked",
            StateKind::Terminated => "terminated",
        };
        f.write_str(label)
    }
}

/// Resource demands of a process about to be created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub memory_required: Size,
    pub cpu_time: Ticks,
}

impl ProcessSpec {
    #[must_use]
    pub const fn new(memory_required: Size, cpu_time: Ticks) -> Self {
        Self {
            memory_required,
            cpu_time,
        }
    }

    /// Draw memory first, then CPU time, each uniformly from its range
    pub fn draw<R: Rng + ?Sized>(
        memory_range: &InclusiveRange<Size>,
        cpu_time_range: &InclusiveRange<Ticks>,
        rng: &mut R,
    ) -> Self {
        let memory_required = memory_range.sample(rng);
        let cpu_time = cpu_time_range.sample(rng);
        Self::new(memory_required, cpu_time)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.memory_required == 0 || self.cpu_time == 0 {
            return Err(ConfigError::InvalidProcessSpec {
                memory_required: self.memory_required,
                cpu_time: self.cpu_time,
            });
        }
        Ok(())
    }
}

/// One simulated workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pid: Pid,
    memory_required: Size,
    pub(crate) cpu_remaining: Ticks,
    pub(crate) state: ProcessState,
}

impl Process {
    pub(crate) fn new(pid: Pid, spec: ProcessSpec) -> Self {
        Self {
            pid,
            memory_required: spec.memory_required,
            cpu_remaining: spec.cpu_time,
            state: ProcessState::WaitingForMemory,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn memory_required(&self) -> Size {
        self.memory_required
    }

    #[inline]
    pub fn cpu_remaining(&self) -> Ticks {
        self.cpu_remaining
    }

    #[inline]
    pub fn io_remaining(&self) -> Ticks {
        self.state.io_remaining()
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline]
    pub fn partition(&self) -> Option<usize> {
        self.state.partition()
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.partition().is_some()
    }
}
