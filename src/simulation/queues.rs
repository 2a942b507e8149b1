/*!
 * Run Queues
 * The holding areas a live process can occupy
 */

use crate::core::types::{Pid, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The process on the CPU and what is left of its quantum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningSlot {
    pub pid: Pid,
    pub quantum_left: Ticks,
}

/// Queue occupancy counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueueLengths {
    pub waiting: usize,
    pub ready: usize,
    pub blocked: usize,
    pub running: bool,
}

/// Pid lists for every holding area
///
/// Only pids are stored here; the process records themselves stay in the
/// process table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunQueues {
    /// Admission queue, FIFO; only the head is ever considered
    pub(crate) waiting: VecDeque<Pid>,
    /// Ready queue, FIFO
    pub(crate) ready: VecDeque<Pid>,
    /// Blocked set, kept in insertion order
    pub(crate) blocked: Vec<Pid>,
    pub(crate) running: Option<RunningSlot>,
}

impl RunQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lengths(&self) -> QueueLengths {
        QueueLengths {
            waiting: self.waiting.len(),
            ready: self.ready.len(),
            blocked: self.blocked.len(),
            running: self.running.is_some(),
        }
    }

    pub fn waiting(&self) -> impl ExactSizeIterator<Item = Pid> + '_ {
        self.waiting.iter().copied()
    }

    pub fn ready(&self) -> impl ExactSizeIterator<Item = Pid> + '_ {
        self.ready.iter().copied()
    }

    pub fn blocked(&self) -> impl ExactSizeIterator<Item = Pid> + '_ {
        self.blocked.iter().copied()
    }

    #[inline]
    pub fn running(&self) -> Option<RunningSlot> {
        self.running
    }

    /// Empty every queue that implies memory ownership
    pub(crate) fn clear_admitted(&mut self) {
        self.ready.clear();
        self.blocked.clear();
        self.running = None;
    }

    /// Processes that could use the CPU right now
    #[inline]
    pub fn runnable(&self) -> usize {
        self.ready.len() + usize::from(self.running.is_some())
    }
}
