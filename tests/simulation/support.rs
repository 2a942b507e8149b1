/*!
 * Shared helpers for simulation tests
 */

use partition_sim::{Pid, SimConfig, Simulator, StateKind};
use std::collections::HashMap;

pub fn simulator(partitions: &[usize], config: SimConfig, seed: u64) -> Simulator {
    Simulator::builder()
        .with_partitions(partitions.to_vec())
        .with_config(config)
        .with_seed(seed)
        .build()
        .unwrap()
}

/// Check every structural invariant through the public read API
pub fn assert_invariants(sim: &Simulator) {
    let memory = sim.memory();

    // Partition occupancy
    for (index, partition) in memory.partitions.iter().enumerate() {
        assert!(
            partition.occupied() <= partition.size(),
            "partition {} over capacity",
            index
        );
        assert_eq!(
            partition.owner().is_none(),
            partition.occupied() == 0,
            "partition {} owner/occupancy mismatch",
            index
        );
    }

    // Used memory accounts exactly for the allocated processes
    let expected_used: usize = sim
        .processes()
        .filter_map(|p| {
            p.partition()
                .map(|i| p.memory_required().min(memory.partitions[i].size()))
        })
        .sum();
    assert_eq!(memory.stats.used_memory, expected_used);

    // Ownership agrees in both directions
    for process in sim.processes() {
        if let Some(index) = process.partition() {
            assert_eq!(memory.partitions[index].owner(), Some(process.pid()));
        }
    }
    for (index, partition) in memory.partitions.iter().enumerate() {
        if let Some(owner) = partition.owner() {
            assert_eq!(sim.process(owner).unwrap().partition(), Some(index));
        }
    }

    // Every live process sits in exactly one holding area matching its state
    let mut membership: HashMap<Pid, Vec<StateKind>> = HashMap::new();
    for pid in sim.waiting_queue() {
        membership.entry(pid).or_default().push(StateKind::WaitingForMemory);
    }
    for pid in sim.ready_queue() {
        membership.entry(pid).or_default().push(StateKind::Ready);
    }
    for pid in sim.blocked_set() {
        membership.entry(pid).or_default().push(StateKind::Blocked);
    }
    if let Some(slot) = sim.running() {
        membership.entry(slot.pid).or_default().push(StateKind::Running);
        assert!(slot.quantum_left <= sim.config().quantum);
    }

    for process in sim.processes() {
        let areas = membership.remove(&process.pid()).unwrap_or_default();
        let kind = process.state().kind();
        if process.is_terminated() {
            assert!(areas.is_empty(), "terminated pid {} still queued", process.pid());
            assert!(!process.is_allocated());
        } else {
            assert_eq!(areas, vec![kind], "pid {} membership", process.pid());
        }
        assert_eq!(
            process.is_allocated(),
            !matches!(kind, StateKind::WaitingForMemory | StateKind::Terminated)
        );
    }
    assert!(membership.is_empty(), "unknown pids queued: {:?}", membership);
}
