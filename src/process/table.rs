/*!
 * Process Table
 * Arena owning every process ever created, indexed by pid
 */

use super::types::{Process, ProcessSpec};
use crate::core::types::{Pid, FIRST_PID};

/// Process arena
///
/// Pids are handed out sequentially and never reused, so a pid maps to a
/// fixed slot: `pid - first_pid`. Queues elsewhere store pids only.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    first_pid: Pid,
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::starting_at(FIRST_PID)
    }

    pub fn starting_at(first_pid: Pid) -> Self {
        Self {
            first_pid,
            processes: Vec::new(),
        }
    }

    /// Create a process in WaitingForMemory with the next free pid
    pub fn create(&mut self, spec: ProcessSpec) -> Pid {
        let pid = self.next_pid();
        self.processes.push(Process::new(pid, spec));
        pid
    }

    #[inline]
    pub fn next_pid(&self) -> Pid {
        self.first_pid + self.processes.len() as Pid
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        pid.checked_sub(self.first_pid)
            .and_then(|slot| self.processes.get(slot as usize))
    }

    /// Mutable access for the engine; the pid must come from this table
    pub(crate) fn entry_mut(&mut self, pid: Pid) -> &mut Process {
        let slot = (pid - self.first_pid) as usize;
        &mut self.processes[slot]
    }

    pub(crate) fn entry(&self, pid: Pid) -> &Process {
        let slot = (pid - self.first_pid) as usize;
        &self.processes[slot]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Process> {
        self.processes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}
