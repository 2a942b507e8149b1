/*!
 * Reconfiguration Tests
 * All-or-nothing commits and the destructive partition reset
 */

use super::support::{assert_invariants, simulator};
use partition_sim::{ConfigError, ConfigUpdate, ProcessSpec, ProcessState, SimConfig};
use pretty_assertions::assert_eq;

#[test]
fn test_partition_reset_requeues_active_processes() {
    let config = SimConfig::new()
        .with_quantum(2)
        .with_block_probability(100)
        .with_io_time_range(4, 4);
    let mut sim = simulator(&[4, 4, 4, 4], config, 10);

    for _ in 0..4 {
        sim.add_process_with(ProcessSpec::new(3, 20)).unwrap();
    }
    sim.add_process_with(ProcessSpec::new(1, 1)).unwrap();
    sim.run(2);
    assert!(sim.queue_lengths().blocked > 0);

    let update = ConfigUpdate::new(SimConfig::default()).with_partitions(vec![8, 8]);
    sim.reconfigure(update).unwrap();

    let lengths = sim.queue_lengths();
    assert_eq!(lengths.ready, 0);
    assert_eq!(lengths.blocked, 0);
    assert!(!lengths.running);
    assert_eq!(lengths.waiting, 5);

    for process in sim.processes() {
        assert_eq!(process.state(), ProcessState::WaitingForMemory);
        assert_eq!(process.partition(), None);
        assert_eq!(process.io_remaining(), 0);
    }

    let memory = sim.memory();
    assert_eq!(memory.partitions.len(), 2);
    assert_eq!(memory.stats.total_memory, 16);
    assert_eq!(memory.stats.used_memory, 0);
    assert_eq!(sim.stats().partition_resets, 1);
    assert_invariants(&sim);
}

#[test]
fn test_terminated_processes_stay_terminated_after_reset() {
    let config = SimConfig::new().with_block_probability(0);
    let mut sim = simulator(&[4, 4], config, 11);

    let done = sim.add_process_with(ProcessSpec::new(2, 1)).unwrap();
    let live = sim.add_process_with(ProcessSpec::new(2, 30)).unwrap();
    sim.step();

    sim.reset_partitions(&[16]).unwrap();

    assert!(sim.process(done.pid).unwrap().is_terminated());
    assert_eq!(sim.waiting_queue().collect::<Vec<_>>(), vec![live.pid]);

    sim.step();
    assert_eq!(
        sim.process(live.pid).unwrap().state(),
        ProcessState::Running { partition: 0 }
    );
    assert_invariants(&sim);
}

#[test]
fn test_each_invalid_field_rejects_whole_update() {
    let mut sim = simulator(&[4, 4], SimConfig::default(), 12);
    for _ in 0..3 {
        sim.add_process();
    }
    sim.run(5);
    let before = sim.snapshot();

    let cases = vec![
        (
            ConfigUpdate::new(SimConfig::new().with_quantum(0)),
            ConfigError::InvalidQuantum(0),
        ),
        (
            ConfigUpdate::new(SimConfig::new().with_cpu_time_range(30, 30)),
            ConfigError::InvalidCpuRange { min: 30, max: 30 },
        ),
        (
            ConfigUpdate::new(SimConfig::new().with_block_probability(101)),
            ConfigError::InvalidBlockProbability(101),
        ),
        (
            ConfigUpdate::new(SimConfig::new().with_io_time_range(0, 3)),
            ConfigError::InvalidIoRange { min: 0, max: 3 },
        ),
        (
            ConfigUpdate::new(SimConfig::new().with_quantum(9)).with_partitions(vec![]),
            ConfigError::EmptyPartitions,
        ),
        (
            ConfigUpdate::new(SimConfig::new())
                .with_partitions(vec![4, 0])
                .reapply_cpu_range(),
            ConfigError::ZeroSizedPartition { index: 1 },
        ),
    ];

    for (update, expected) in cases {
        assert_eq!(sim.reconfigure(update), Err(expected));
        assert_eq!(sim.snapshot(), before);
    }
}

#[test]
fn test_new_cpu_range_applies_to_new_processes_only() {
    let mut sim = simulator(&[8, 8, 8], SimConfig::new().with_block_probability(0), 13);
    let old = sim.add_process_with(ProcessSpec::new(2, 40)).unwrap();

    sim.set_config(
        SimConfig::new()
            .with_block_probability(0)
            .with_cpu_time_range(1, 2),
    )
    .unwrap();
    let new = sim.add_process();

    assert_eq!(sim.process(old.pid).unwrap().cpu_remaining(), 40);
    assert!(sim.process(new.pid).unwrap().cpu_remaining() <= 2);
}

#[test]
fn test_reapply_and_reset_together() {
    let mut sim = simulator(&[4, 4], SimConfig::new().with_block_probability(0), 14);
    for _ in 0..3 {
        sim.add_process_with(ProcessSpec::new(4, 50)).unwrap();
    }
    sim.step();

    let config = SimConfig::new()
        .with_block_probability(0)
        .with_cpu_time_range(5, 6);
    sim.reconfigure(
        ConfigUpdate::new(config)
            .with_partitions(vec![4, 4, 4])
            .reapply_cpu_range(),
    )
    .unwrap();

    assert!(sim
        .processes()
        .all(|p| (5..=6).contains(&p.cpu_remaining())));
    assert_eq!(sim.queue_lengths().waiting, 3);
    assert_invariants(&sim);
}
