//! Property tests for the allocation-state engine

use banker_core::{vector, BankerError, Decision, SimulationState};
use banker_simulation_engine::{
    advance, all_safe_sequences, build_request_queue, is_safe, MatrixGenerator, SimulationConfig,
    Simulator,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config_strategy() -> impl Strategy<Value = SimulationConfig> {
    (1usize..=10, 1usize..=5, 0u32..=10, 0u32..=30, any::<u64>()).prop_map(
        |(processes, resources, lowest, spread, seed)| {
            SimulationConfig::new(processes, resources, lowest, lowest + spread).with_seed(seed)
        },
    )
}

proptest! {
    #[test]
    fn generated_states_satisfy_bounds(config in config_strategy()) {
        let mut rng = config.rng();
        let system = MatrixGenerator::from_config(&config).unwrap().generate(&mut rng);

        for j in 0..config.resources {
            prop_assert!(system.total[j] >= config.lowest && system.total[j] <= config.highest);
            let held: u32 = system.allocation.iter().map(|row| row[j]).sum();
            prop_assert!(held <= system.total[j]);
            prop_assert_eq!(system.available[j], system.total[j] - held);
        }
        for i in 0..config.processes {
            for j in 0..config.resources {
                prop_assert!(system.allocation[i][j] <= system.max_claim[i][j]);
                prop_assert!(system.max_claim[i][j] <= system.total[j]);
                prop_assert_eq!(system.need[i][j], system.max_claim[i][j] - system.allocation[i][j]);
            }
        }
    }

    #[test]
    fn queued_requests_sum_to_need(config in config_strategy(), padding in 0usize..8) {
        let mut rng = config.rng();
        let system = MatrixGenerator::from_config(&config).unwrap().generate(&mut rng);
        let queue = build_request_queue(&system.need, padding, &mut rng);

        prop_assert_eq!(queue.iter().filter(|r| r.is_idle()).count(), padding);
        for (pid, need) in system.need.iter().enumerate() {
            let mut sum = vec![0; config.resources];
            for request in queue.requests_for(pid) {
                vector::add_assign(&mut sum, &request.amounts);
            }
            prop_assert_eq!(&sum, need);
        }
    }

    #[test]
    fn safety_check_is_deterministic_and_agrees_with_enumeration(seed in any::<u64>(), processes in 1usize..=6) {
        let mut rng = StdRng::seed_from_u64(seed);
        let system = MatrixGenerator::new(processes, 3, 0, 8).generate(&mut rng);

        let first = is_safe(&system.allocation, &system.need, &system.available);
        let second = is_safe(&system.allocation, &system.need, &system.available);
        prop_assert_eq!(&first, &second);

        let orders = all_safe_sequences(&system.allocation, &system.need, &system.available);
        prop_assert_eq!(first.safe, !orders.is_empty());
        if first.safe {
            // Lowest-index-first is the lexicographically smallest safe order.
            prop_assert_eq!(&orders[0], &first.sequence);
        }
    }

    #[test]
    fn processing_preserves_invariants(config in config_strategy()) {
        let mut rng = config.rng();
        let mut simulator = Simulator::from_config(&config, &mut rng).unwrap();
        let initially_safe = simulator.safety().safe;

        while !simulator.is_finished() {
            let before = simulator.state().clone();
            let outcome = simulator.step().unwrap().clone();
            let after = simulator.state();

            prop_assert_eq!(after.tick, before.tick + 1);
            prop_assert!(after.is_consistent());
            if !outcome.decision.is_granted() {
                prop_assert_eq!(&after.allocation, &before.allocation);
                prop_assert_eq!(&after.need, &before.need);
                prop_assert_eq!(&after.available, &before.available);
            }
            if let Decision::Granted { completed: true, .. } = outcome.decision {
                let pid = outcome.request.pid.unwrap();
                prop_assert!(vector::is_zero(&after.allocation[pid]));
            }
            if initially_safe {
                prop_assert!(simulator.safety().safe);
            }
        }
    }
}

#[test]
fn advance_past_end_reports_exhaustion() {
    let config = SimulationConfig::new(3, 2, 1, 6).with_seed(5).with_padding(1);
    let mut rng = config.rng();
    let simulator = Simulator::from_config(&config, &mut rng).unwrap();

    let queue = simulator.queue().clone();
    let mut state = SimulationState::new(simulator.system());
    state.tick = queue.len();
    let snapshot = state.clone();

    let err = advance(&mut state, &queue).unwrap_err();
    assert_eq!(
        err,
        BankerError::QueueExhausted {
            tick: queue.len(),
            len: queue.len(),
        }
    );
    assert_eq!(state, snapshot);
}
