/*!
 * Partition Scheduler Simulator - Main Entry Point
 *
 * Headless driver: builds a simulator from environment settings, runs it
 * on a timer, and prints the final state as JSON.
 */

use miette::IntoDiagnostic;
use tokio::sync::watch;
use tracing::{error, info};

use partition_sim::{
    init_tracing, shared, MemoryInfo, Settings, SimulationTask, Simulator, StateKind,
};

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid settings");
            return Err(e.into());
        }
    };

    let mut builder = Simulator::builder()
        .with_partitions(settings.partitions.clone())
        .with_config(settings.config);
    if let Some(seed) = settings.seed {
        builder = builder.with_seed(seed);
    }
    let mut simulator = builder.build()?;

    for _ in 0..settings.initial_processes {
        simulator.add_process();
    }

    let simulator = shared(simulator);
    let task = SimulationTask::spawn(simulator.clone(), settings.tick_interval);
    let ticks = task.subscribe();

    match settings.ticks {
        Some(limit) => info!(limit, "Running simulation (Ctrl+C to stop early)"),
        None => info!("Running simulation until Ctrl+C"),
    }

    tokio::select! {
        _ = wait_for_ticks(ticks, settings.ticks) => {
            info!("Tick limit reached");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Interrupted");
        }
    }

    task.shutdown().await;

    let snapshot = simulator.lock().snapshot();
    let (memory, pressure) = {
        let sim = simulator.lock();
        let table = sim.partition_table();
        (table.stats(), table.pressure())
    };
    info!(
        ticks = snapshot.stats.ticks,
        created = snapshot.stats.processes_created,
        completed = snapshot.stats.processes_completed,
        waiting = snapshot.count(StateKind::WaitingForMemory),
        ready = snapshot.count(StateKind::Ready),
        blocked = snapshot.count(StateKind::Blocked),
        preemptions = snapshot.stats.preemptions,
        used = memory.used_memory,
        total = memory.total_memory,
        pressure = %pressure,
        "Simulation finished"
    );

    let json = serde_json::to_string_pretty(&snapshot).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Resolve once the simulation has advanced `limit` ticks; never without one
async fn wait_for_ticks(mut ticks: watch::Receiver<u64>, limit: Option<u64>) {
    let Some(limit) = limit else {
        return std::future::pending().await;
    };
    if ticks.wait_for(|t| *t >= limit).await.is_err() {
        error!("Simulation task stopped before reaching the tick limit");
    }
}
