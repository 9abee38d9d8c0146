//! End-to-end prediction against the iris model file.

mod common;

use forest_vote::testing::iris_model;
use forest_vote::{
    predict, ForestModel, ForestPredictor, InvalidInputError, PredictError, PredictorConfig,
};
use rstest::rstest;

fn load_iris() -> ForestModel {
    ForestModel::read_path(common::iris_path()).expect("iris fixture loads")
}

#[test]
fn file_matches_in_memory_fixture() {
    assert_eq!(load_iris(), iris_model());
}

#[rstest]
#[case::setosa([5.1, 3.5, 1.4, 0.2], "setosa")]
#[case::versicolor([6.4, 3.2, 4.5, 1.5], "versicolor")]
#[case::virginica([6.3, 3.3, 6.0, 2.5], "virginica")]
#[case::two_of_three([6.0, 3.0, 5.0, 1.7], "virginica")]
#[case::three_way_tie([5.0, 3.0, 5.0, 1.7], "setosa")]
#[case::threshold_goes_left([5.0, 3.0, 2.45, 0.8], "setosa")]
fn predicts(#[case] features: [f64; 4], #[case] expected: &str) {
    let model = load_iris();
    assert_eq!(predict(&model, &features), Ok(expected));
}

#[test]
fn result_is_always_a_target_name() {
    let model = load_iris();
    for row in forest_vote::testing::random_rows(3, 200, 4) {
        let shifted: Vec<f64> = row.iter().map(|x| x * 3.0 + 3.5).collect();
        let label = predict(&model, &shifted).unwrap();
        assert!(model.target_names().iter().any(|name| name == label));
    }
}

#[test]
fn votes_sum_to_tree_count() {
    let model = load_iris();
    let predictor = ForestPredictor::new(&model);
    let tally = predictor.predict_votes(&[6.0, 3.0, 5.0, 1.7]).unwrap();
    assert_eq!(tally.counts(), &[0, 1, 2]);
    assert_eq!(tally.total() as usize, model.n_trees());
}

#[test]
fn wrong_length_rejected() {
    let model = load_iris();
    assert_eq!(
        predict(&model, &[5.1, 3.5, 1.4]),
        Err(PredictError::InvalidInput(InvalidInputError::LengthMismatch {
            expected: 4,
            actual: 3,
        }))
    );
    assert!(matches!(
        predict(&model, &[5.1, 3.5, 1.4, 0.2, 9.9]),
        Err(PredictError::InvalidInput(InvalidInputError::LengthMismatch { .. }))
    ));
}

#[test]
fn non_finite_input_rejected() {
    let model = load_iris();
    let err = predict(&model, &[5.1, f64::INFINITY, 1.4, 0.2]).unwrap_err();
    match err {
        PredictError::InvalidInput(e) => assert_eq!(e.feature(), Some("sepal_width")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn repeated_calls_agree() {
    let model = load_iris();
    let features = [5.0, 3.0, 5.0, 1.7];
    let first = predict(&model, &features).unwrap();
    for _ in 0..10 {
        assert_eq!(predict(&model, &features).unwrap(), first);
    }
}

#[test]
fn threaded_predictor_agrees() {
    let model = forest_vote::testing::random_model(21, 40, 4, 3);
    let config = PredictorConfig::builder()
        .n_threads(std::num::NonZeroUsize::new(3).unwrap())
        .parallel_min_trees(4)
        .build()
        .unwrap();
    let threaded = ForestPredictor::with_config(&model, &config).unwrap();
    let sequential = ForestPredictor::sequential(&model);
    for row in forest_vote::testing::random_rows(5, 64, 4) {
        assert_eq!(threaded.predict_votes(&row), sequential.predict_votes(&row));
    }
}
