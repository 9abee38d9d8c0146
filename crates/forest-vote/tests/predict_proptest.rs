//! Property tests over random forests.

use forest_vote::testing::random_model;
use forest_vote::{stable_argmax, ForestPredictor};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prediction_is_a_target_name(
        seed in 0u64..1000,
        row in prop::collection::vec(-2.0f64..2.0, 4),
    ) {
        let model = random_model(seed, 9, 4, 3);
        let label = forest_vote::predict(&model, &row).unwrap();
        prop_assert!(model.target_names().iter().any(|name| name == label));
    }

    #[test]
    fn winner_has_the_most_votes(
        seed in 0u64..1000,
        row in prop::collection::vec(-2.0f64..2.0, 5),
    ) {
        let model = random_model(seed, 15, 5, 4);
        let predictor = ForestPredictor::sequential(&model);
        let tally = predictor.predict_votes(&row).unwrap();
        let winner = predictor.predict_index(&row).unwrap();

        prop_assert_eq!(tally.total() as usize, model.n_trees());
        let max = *tally.counts().iter().max().unwrap();
        prop_assert_eq!(tally.count(winner), max);
        prop_assert!(tally.counts()[..winner].iter().all(|&c| c < max));
    }

    #[test]
    fn argmax_picks_first_maximum(values in prop::collection::vec(0u32..5, 1..12)) {
        let idx = stable_argmax(&values).unwrap();
        let max = *values.iter().max().unwrap();
        prop_assert_eq!(values[idx], max);
        prop_assert!(values[..idx].iter().all(|&v| v < max));
    }
}
