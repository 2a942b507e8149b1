/*!
 * Simulation Core Operations
 * Process creation, admission, dispatch, and the per-tick transition
 */

use super::queues::RunningSlot;
use super::Simulator;
use crate::core::errors::SimResult;
use crate::core::types::Pid;
use crate::memory::MemoryInfo;
use crate::process::{ProcessSpec, ProcessState};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info, warn};

/// Where a newly created process ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionOutcome {
    /// Got a partition and joined the ready queue
    Admitted { partition: usize },
    /// Queued for memory
    Waiting,
}

/// Result of creating a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    pub pid: Pid,
    pub outcome: AdmissionOutcome,
}

impl Admission {
    #[inline]
    pub fn is_admitted(&self) -> bool {
        matches!(self.outcome, AdmissionOutcome::Admitted { .. })
    }
}

impl Simulator {
    /// Create a process with randomly drawn requirements and try to admit it
    pub fn add_process(&mut self) -> Admission {
        let spec = ProcessSpec::draw(
            &self.config.memory_range,
            &self.config.cpu_time_range,
            &mut *self.rng,
        );
        self.spawn(spec)
    }

    /// Create a process with explicit requirements and try to admit it
    pub fn add_process_with(&mut self, spec: ProcessSpec) -> SimResult<Admission> {
        spec.validate()?;
        Ok(self.spawn(spec))
    }

    fn spawn(&mut self, spec: ProcessSpec) -> Admission {
        let pid = self.processes.create(spec);
        self.stats.processes_created += 1;

        // A new process gets a direct first-fit attempt of its own
        let outcome = match self.memory.first_fit(spec.memory_required) {
            Some(partition) => {
                self.admit(pid, partition);
                AdmissionOutcome::Admitted { partition }
            }
            None => {
                if spec.memory_required > self.memory.largest() {
                    warn!(
                        pid,
                        memory_required = spec.memory_required,
                        largest_partition = self.memory.largest(),
                        "Process fits no partition and will wait indefinitely"
                    );
                }
                self.queues.waiting.push_back(pid);
                info!(
                    pid,
                    memory_required = spec.memory_required,
                    waiting = self.queues.waiting.len(),
                    "Process queued for memory"
                );
                AdmissionOutcome::Waiting
            }
        };

        Admission { pid, outcome }
    }

    fn admit(&mut self, pid: Pid, partition: usize) {
        let process = self.processes.entry_mut(pid);
        debug_assert!(matches!(process.state, ProcessState::WaitingForMemory));

        self.memory
            .allocate(partition, pid, process.memory_required());
        process.state = ProcessState::Ready { partition };
        self.queues.ready.push_back(pid);
        self.stats.processes_admitted += 1;

        info!(
            pid,
            partition,
            memory_required = process.memory_required(),
            "Process admitted"
        );
    }

    /// Admit from the head of the admission queue while the head fits
    ///
    /// Only the head is examined: a head that fits no partition stalls
    /// everyone queued behind it. Returns the number of processes admitted.
    pub fn try_admit_from_waiting(&mut self) -> usize {
        let mut admitted = 0;

        while let Some(&pid) = self.queues.waiting.front() {
            let required = self.processes.entry(pid).memory_required();
            let Some(partition) = self.memory.first_fit(required) else {
                break;
            };
            self.queues.waiting.pop_front();
            self.admit(pid, partition);
            admitted += 1;
        }

        admitted
    }

    /// Move the ready head onto an idle CPU with a fresh quantum
    pub fn dispatch_if_idle(&mut self) -> Option<Pid> {
        if self.queues.running.is_some() {
            return None;
        }
        let pid = self.queues.ready.pop_front()?;

        let process = self.processes.entry_mut(pid);
        let partition = match process.state {
            ProcessState::Ready { partition } => partition,
            other => unreachable!("pid {} in ready queue while {:?}", pid, other),
        };
        process.state = ProcessState::Running { partition };

        self.queues.running = Some(RunningSlot {
            pid,
            quantum_left: self.config.quantum,
        });
        self.stats.context_switches += 1;

        debug!(pid, quantum = self.config.quantum, "Dispatched");
        Some(pid)
    }

    /// Advance simulated time by one tick
    pub fn step(&mut self) {
        self.stats.ticks += 1;
        let span = debug_span!("tick", tick = self.stats.ticks);
        let _enter = span.enter();

        self.try_admit_from_waiting();
        self.dispatch_if_idle();
        self.execute_running();
        self.advance_blocked();
        self.dispatch_if_idle();

        debug!(
            runnable = self.queues.runnable(),
            waiting = self.queues.waiting.len(),
            blocked = self.queues.blocked.len(),
            "Tick complete"
        );
    }

    /// Run `ticks` steps back to back
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    fn execute_running(&mut self) {
        let Some(mut slot) = self.queues.running else {
            return;
        };
        let pid = slot.pid;

        let process = self.processes.entry_mut(pid);
        let partition = match process.state {
            ProcessState::Running { partition } => partition,
            other => unreachable!("pid {} in running slot while {:?}", pid, other),
        };

        process.cpu_remaining = process.cpu_remaining.saturating_sub(1);
        slot.quantum_left = slot.quantum_left.saturating_sub(1);

        if process.cpu_remaining == 0 {
            process.state = ProcessState::Terminated;
            self.queues.running = None;
            let released = self.memory.process_memory(pid);
            self.memory.free(partition);
            self.stats.processes_completed += 1;
            info!(pid, partition, released, "Process terminated, partition released");

            // Freed memory may unblock the admission queue right away
            self.try_admit_from_waiting();
            return;
        }

        if self.rng.gen_range(0..100) < self.config.block_probability {
            let io_remaining = self.config.io_time_range.sample(&mut *self.rng);
            process.state = ProcessState::Blocked {
                partition,
                io_remaining,
            };
            self.queues.running = None;
            self.queues.blocked.push(pid);
            self.stats.blocks += 1;
            debug!(pid, io_remaining, "Blocked on I/O");
            return;
        }

        // A lone runnable process keeps the CPU past its quantum
        if slot.quantum_left == 0 && !self.queues.ready.is_empty() {
            process.state = ProcessState::Ready { partition };
            self.queues.running = None;
            self.queues.ready.push_back(pid);
            self.stats.preemptions += 1;
            debug!(pid, cpu_remaining = process.cpu_remaining, "Preempted");
        } else {
            self.queues.running = Some(slot);
        }
    }

    fn advance_blocked(&mut self) {
        let blocked = std::mem::take(&mut self.queues.blocked);
        let mut still_blocked = Vec::with_capacity(blocked.len());

        for pid in blocked {
            let process = self.processes.entry_mut(pid);
            let (partition, io_remaining) = match process.state {
                ProcessState::Blocked {
                    partition,
                    io_remaining,
                } => (partition, io_remaining.saturating_sub(1)),
                other => unreachable!("pid {} in blocked set while {:?}", pid, other),
            };

            if io_remaining == 0 {
                process.state = ProcessState::Ready { partition };
                self.queues.ready.push_back(pid);
                self.stats.io_completions += 1;
                debug!(pid, "I/O complete");
            } else {
                process.state = ProcessState::Blocked {
                    partition,
                    io_remaining,
                };
                still_blocked.push(pid);
            }
        }

        self.queues.blocked = still_blocked;
    }
}
