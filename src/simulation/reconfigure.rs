/*!
 * Reconfiguration
 * Validate-then-commit changes to parameters and the partition layout
 */

use super::config::{ConfigUpdate, SimConfig};
use super::Simulator;
use crate::core::errors::SimResult;
use crate::core::types::{Pid, Size};
use crate::memory::validate_layout;
use crate::process::ProcessState;
use tracing::{info, warn};

impl Simulator {
    /// Apply a configuration change as a single unit
    ///
    /// Every field is validated before anything is touched; on error the
    /// simulator is left exactly as it was. New parameters apply from the
    /// next tick or process creation. When both are requested, CPU times are
    /// redrawn before the partition reset.
    pub fn reconfigure(&mut self, update: ConfigUpdate) -> SimResult<()> {
        if let Err(e) = update.validate() {
            warn!(error = %e, "Rejected reconfiguration");
            return Err(e);
        }

        let ConfigUpdate {
            config,
            partitions,
            reapply_cpu_range,
        } = update;

        self.commit_config(config);
        if reapply_cpu_range {
            self.reapply_cpu_range();
        }
        if let Some(sizes) = partitions {
            self.replace_partitions(&sizes);
        }

        Ok(())
    }

    /// Replace only the scheduler and workload parameters
    pub fn set_config(&mut self, config: SimConfig) -> SimResult<()> {
        self.reconfigure(ConfigUpdate::new(config))
    }

    /// Redraw `cpu_remaining` for every live process from the current CPU range
    pub fn reapply_cpu_range(&mut self) {
        let range = self.config.cpu_time_range;
        let mut redrawn = 0usize;

        for process in self.processes.iter_mut().filter(|p| !p.is_terminated()) {
            process.cpu_remaining = range.sample(&mut *self.rng).max(1);
            redrawn += 1;
        }

        info!(redrawn, cpu_time = %range, "CPU time reapplied to live processes");
    }

    /// Install a new partition layout, sending every live process back to
    /// the admission queue in creation order
    pub fn reset_partitions(&mut self, sizes: &[Size]) -> SimResult<()> {
        if let Err(e) = validate_layout(sizes) {
            warn!(error = %e, "Rejected partition layout");
            return Err(e);
        }
        self.replace_partitions(sizes);
        Ok(())
    }

    fn commit_config(&mut self, config: SimConfig) {
        let previous = std::mem::replace(&mut self.config, config);

        // Keep the running slot within the (possibly smaller) quantum
        if let Some(slot) = self.queues.running.as_mut() {
            slot.quantum_left = slot.quantum_left.min(config.quantum);
        }

        if previous != config {
            info!(
                quantum = config.quantum,
                cpu_time = %config.cpu_time_range,
                block_probability = config.block_probability,
                io_time = %config.io_time_range,
                memory = %config.memory_range,
                "Configuration updated"
            );
        }
    }

    fn replace_partitions(&mut self, sizes: &[Size]) {
        if let Err(e) = self.memory.reset(sizes) {
            unreachable!("partition layout validated before commit: {}", e);
        }

        let mut requeued: Vec<Pid> = Vec::new();
        for process in self.processes.iter_mut().filter(|p| !p.is_terminated()) {
            process.state = ProcessState::WaitingForMemory;
            requeued.push(process.pid());
        }

        self.queues.clear_admitted();
        self.queues.waiting = requeued.into();
        self.stats.partition_resets += 1;

        info!(
            partitions = ?sizes,
            waiting = self.queues.waiting.len(),
            "Partition table reset, live processes returned to admission queue"
        );
    }
}
