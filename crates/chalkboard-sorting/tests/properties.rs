use chalkboard_sorting::{
    record, Algorithm, BubbleState, Highlight, SorterSession, Step,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

const RECORDED: [Algorithm; 4] = [
    Algorithm::Insertion,
    Algorithm::Selection,
    Algorithm::Merge,
    Algorithm::Quick,
];

fn sorted(values: &[u32]) -> Vec<u32> {
    let mut out = values.to_vec();
    out.sort_unstable();
    out
}

fn in_bounds(step: &Step<u32>, len: usize) -> bool {
    step.highlight.indices().iter().all(|&i| i < len)
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn recorded_logs_end_sorted(values in prop::collection::vec(0u32..20, 0..40)) {
        let expected = sorted(&values);
        for algorithm in RECORDED {
            let steps = record(algorithm, &values).unwrap();
            let last = steps.last().map(|s| s.snapshot.clone()).unwrap_or_else(|| values.clone());
            prop_assert_eq!(&last, &expected, "{}", algorithm);
        }
    }

    #[test]
    fn every_snapshot_is_a_permutation(values in prop::collection::vec(0u32..10, 0..30)) {
        let expected = sorted(&values);
        for algorithm in RECORDED {
            for step in record(algorithm, &values).unwrap() {
                prop_assert_eq!(step.snapshot.len(), values.len());
                prop_assert_eq!(sorted(&step.snapshot), expected.clone(), "{}", algorithm);
                prop_assert!(in_bounds(&step, values.len()));
            }
        }
    }

    #[test]
    fn bubble_states_stay_permutations(values in prop::collection::vec(0u32..10, 0..30)) {
        let expected = sorted(&values);
        let mut state = BubbleState::new(values.clone());
        while !state.is_done() {
            let action = state.step();
            prop_assert_eq!(sorted(state.array()), expected.clone());
            if let Highlight::Pair(i, j) = action.highlight {
                prop_assert_eq!(j, i + 1);
            }
        }
        prop_assert_eq!(state.array(), expected.as_slice());
    }

    #[test]
    fn bubble_never_exceeds_comparison_bound(values in prop::collection::vec(any::<u32>(), 0..40)) {
        let n = values.len();
        let mut state = BubbleState::new(values);
        state.run_to_completion();
        prop_assert!(state.comparisons() <= n * n.saturating_sub(1) / 2);
    }

    #[test]
    fn recording_is_deterministic(values in prop::collection::vec(0u32..100, 0..30)) {
        for algorithm in [Algorithm::Merge, Algorithm::Quick] {
            prop_assert_eq!(record(algorithm, &values), record(algorithm, &values));
        }
    }

    #[test]
    fn session_replay_ends_on_sorted_frame(
        values in prop::collection::vec(5u32..=95, 1..25),
        pick in 0usize..4,
    ) {
        let algorithm = RECORDED[pick];
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(0);
        let mut session = SorterSession::default();
        session.reset(algorithm, values.clone());

        let mut last = None;
        loop {
            let outcome = session.step(algorithm, &mut rng);
            if outcome.done {
                prop_assert!(outcome.array.is_none());
                break;
            }
            last = outcome.array;
        }
        // An empty insertion or selection log means the input was already in order.
        let last = last.unwrap_or_else(|| values.clone());
        prop_assert_eq!(last, sorted(&values));
    }
}
