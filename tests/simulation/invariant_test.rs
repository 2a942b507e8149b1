/*!
 * Invariant Tests
 * Random workloads checked against the structural invariants after every call
 */

use super::support::{assert_invariants, simulator};
use partition_sim::{ConfigUpdate, SimConfig, StateKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Step,
    Run(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Add),
        5 => Just(Op::Step),
        1 => (1u8..20).prop_map(Op::Run),
    ]
}

fn config() -> impl Strategy<Value = SimConfig> {
    (1u32..6, 0u32..=100, 1u32..4, 1usize..20).prop_map(|(quantum, block, io_min, mem_max)| {
        SimConfig::new()
            .with_quantum(quantum)
            .with_block_probability(block)
            .with_cpu_time_range(1, 12)
            .with_io_time_range(io_min, io_min + 3)
            .with_memory_range(1, mem_max)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_under_random_workloads(
        partitions in prop::collection::vec(1usize..16, 1..6),
        config in config(),
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..120),
    ) {
        let mut sim = simulator(&partitions, config, seed);

        for op in ops {
            match op {
                Op::Add => { sim.add_process(); }
                Op::Step => sim.step(),
                Op::Run(n) => sim.run(u64::from(n)),
            }
            assert_invariants(&sim);
        }
    }

    #[test]
    fn unsatisfiable_head_stalls_admission(
        partitions in prop::collection::vec(1usize..8, 1..4),
        seed in any::<u64>(),
        ticks in 1u64..200,
    ) {
        let largest = partitions.iter().copied().max().unwrap();
        let config = SimConfig::new().with_memory_range(1, largest + 4);
        let mut sim = simulator(&partitions, config, seed);

        // Fill memory, then queue an oversized head followed by small waiters
        for _ in 0..partitions.len() {
            sim.add_process_with(partition_sim::ProcessSpec::new(1, 5)).unwrap();
        }
        let head = sim
            .add_process_with(partition_sim::ProcessSpec::new(largest + 1, 5))
            .unwrap();
        let tail = sim
            .add_process_with(partition_sim::ProcessSpec::new(1, 5))
            .unwrap();
        prop_assert!(!head.is_admitted());
        prop_assert!(!tail.is_admitted());

        sim.run(ticks);

        prop_assert_eq!(
            sim.process(tail.pid).unwrap().state().kind(),
            StateKind::WaitingForMemory
        );
        prop_assert_eq!(sim.waiting_queue().next(), Some(head.pid));
        assert_invariants(&sim);
    }

    #[test]
    fn partition_reset_empties_admitted_queues(
        seed in any::<u64>(),
        warmup in 0u64..100,
        new_layout in prop::collection::vec(1usize..16, 1..6),
    ) {
        let mut sim = simulator(&[2, 2, 4, 6, 6, 8, 8, 12, 16], SimConfig::default(), seed);
        for _ in 0..10 {
            sim.add_process();
        }
        sim.run(warmup);

        let live = sim.processes().filter(|p| !p.is_terminated()).count();
        let update = ConfigUpdate::new(SimConfig::default()).with_partitions(new_layout);
        sim.reconfigure(update).unwrap();

        let lengths = sim.queue_lengths();
        prop_assert_eq!(lengths.waiting, live);
        prop_assert_eq!(lengths.ready, 0);
        prop_assert_eq!(lengths.blocked, 0);
        prop_assert!(!lengths.running);
        prop_assert!(sim.processes().all(|p| p.partition().is_none()));
        prop_assert!(sim.processes().all(|p| p.io_remaining() == 0));
        assert_invariants(&sim);
    }
}
