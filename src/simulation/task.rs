/*!
 * Simulation Task - Automatic Tick Driver
 *
 * Background task that advances a shared simulator on a fixed interval.
 * Each tick takes the simulator lock for the whole step, so concurrent
 * readers only ever observe state between ticks.
 */

use super::config::TickInterval;
use super::Simulator;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Simulator behind the single exclusive lock all callers go through
pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// Wrap a simulator for use from several tasks or threads
pub fn shared(simulator: Simulator) -> SharedSimulator {
    Arc::new(Mutex::new(simulator))
}

/// Control messages for the simulation task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Change the delay between automatic ticks
    SetInterval(TickInterval),
    /// Stop advancing time automatically
    Pause,
    /// Resume automatic ticks
    Resume,
    /// Advance exactly one tick, paused or not
    Step,
    /// Create one random process
    AddProcess,
    /// Shutdown the simulation task
    Shutdown,
}

/// Handle to the simulation background task
pub struct SimulationTask {
    command_tx: mpsc::UnboundedSender<SimulationCommand>,
    ticks_rx: watch::Receiver<u64>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl SimulationTask {
    /// Spawn a task that starts ticking immediately
    pub fn spawn(simulator: SharedSimulator, interval: TickInterval) -> Self {
        Self::spawn_with_state(simulator, interval, true)
    }

    /// Spawn a task that waits for `Resume` or `Step`
    pub fn spawn_paused(simulator: SharedSimulator, interval: TickInterval) -> Self {
        Self::spawn_with_state(simulator, interval, false)
    }

    fn spawn_with_state(simulator: SharedSimulator, interval: TickInterval, active: bool) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (ticks_tx, ticks_rx) = watch::channel(simulator.lock().stats().ticks);

        let handle = tokio::spawn(async move {
            run_simulation_loop(simulator, interval, active, command_rx, ticks_tx).await;
        });

        info!(
            interval_ms = interval.as_millis(),
            active, "Simulation task spawned"
        );

        Self {
            command_tx,
            ticks_rx,
            handle: Some(handle),
        }
    }

    pub fn set_interval(&self, interval: TickInterval) {
        self.send(SimulationCommand::SetInterval(interval));
    }

    pub fn pause(&self) {
        self.send(SimulationCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(SimulationCommand::Resume);
    }

    pub fn step(&self) {
        self.send(SimulationCommand::Step);
    }

    pub fn add_process(&self) {
        self.send(SimulationCommand::AddProcess);
    }

    pub fn send(&self, command: SimulationCommand) {
        if self.command_tx.send(command).is_err() {
            warn!(?command, "Simulation task is gone; command dropped");
        }
    }

    /// Watch the tick counter, updated after every completed step
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks_rx.clone()
    }

    /// Shutdown the simulation task gracefully
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(SimulationCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Simulation task shutdown error: {}", e);
            } else {
                info!("Simulation task shutdown complete");
            }
        }
    }
}

impl Drop for SimulationTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.command_tx.send(SimulationCommand::Shutdown);
        }
    }
}

fn tick(simulator: &SharedSimulator, ticks_tx: &watch::Sender<u64>) {
    let ticks = {
        let mut sim = simulator.lock();
        sim.step();
        sim.stats().ticks
    };
    ticks_tx.send_replace(ticks);
}

fn new_interval(interval: TickInterval) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(interval.as_duration());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval
}

async fn run_simulation_loop(
    simulator: SharedSimulator,
    interval: TickInterval,
    mut active: bool,
    mut command_rx: mpsc::UnboundedReceiver<SimulationCommand>,
    ticks_tx: watch::Sender<u64>,
) {
    let mut ticker = new_interval(interval);
    info!(interval_ms = interval.as_millis(), "Simulation loop started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if active {
                    tick(&simulator, &ticks_tx);
                }
            }

            command = command_rx.recv() => {
                let Some(command) = command else {
                    info!("Simulation handle dropped, stopping loop");
                    break;
                };

                match command {
                    SimulationCommand::SetInterval(interval) => {
                        info!(interval_ms = interval.as_millis(), "Tick interval updated");
                        ticker = new_interval(interval);
                    }

                    SimulationCommand::Pause => {
                        info!("Simulation paused");
                        active = false;
                    }

                    SimulationCommand::Resume => {
                        info!("Simulation resumed");
                        active = true;
                    }

                    SimulationCommand::Step => {
                        tick(&simulator, &ticks_tx);
                        debug!("Manual tick");
                    }

                    SimulationCommand::AddProcess => {
                        let admission = simulator.lock().add_process();
                        debug!(pid = admission.pid, admitted = admission.is_admitted(), "Process added");
                    }

                    SimulationCommand::Shutdown => {
                        info!("Simulation task shutting down");
                        break;
                    }
                }
            }
        }
    }
}
