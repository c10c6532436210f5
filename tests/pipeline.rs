//! End-to-end prediction tests against the JSON artifact fixtures.
//!
//! Expected probabilities in `tests/test-cases/*.json` were computed
//! independently from the same fitted parameters.

use std::fs::File;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use serde::de::DeserializeOwned;

use campaign_predictor::testing::{
    even_split_request, reference_artifacts, PredictionCase, DEFAULT_TOLERANCE,
};
use campaign_predictor::{
    ArtifactPaths, ArtifactSet, CampaignRequest, DifficultySource, Outcome, Pipeline,
    PipelineConfig, PredictError, FEATURE_NAMES, N_FEATURES,
};

// =============================================================================
// Test Data Loading
// =============================================================================

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

fn load_json<T: DeserializeOwned>(name: &str) -> T {
    let path = test_cases_dir().join(name);
    let file =
        File::open(&path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
    serde_json::from_reader(file)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

fn fixture_artifacts() -> ArtifactSet {
    ArtifactSet::load(&ArtifactPaths::in_dir(test_cases_dir().join("artifacts")))
        .expect("fixture artifacts load")
}

fn run_cases(pipeline: &Pipeline, cases: &[PredictionCase]) {
    for case in cases {
        let result = pipeline.predict(&case.request);

        match (&case.reason, case.probability) {
            (Some(reason), _) => {
                let err = result.expect_err(&case.name);
                assert_eq!(err.reason(), reason.as_str(), "{}", case.name);
                assert!(
                    pipeline.features(&case.request).is_err(),
                    "{}: rejected request must not produce features",
                    case.name
                );
            }
            (None, Some(expected)) => {
                let prediction = result.unwrap_or_else(|e| panic!("{}: {e}", case.name));
                assert_abs_diff_eq!(prediction.probability, expected, epsilon = DEFAULT_TOLERANCE);
                assert_eq!(prediction.is_positive(), expected >= 0.5, "{}", case.name);

                if let Some(features) = &case.features {
                    let actual = pipeline.features(&case.request).unwrap();
                    assert_eq!(actual.as_array().as_slice(), features.as_slice(), "{}", case.name);
                }
            }
            (None, None) => panic!("{}: case has neither reason nor probability", case.name),
        }
    }
}

// =============================================================================
// Fixture parity
// =============================================================================

#[test]
fn fixture_artifacts_match_reference() {
    assert_eq!(fixture_artifacts(), reference_artifacts());
}

#[test]
fn recorded_cases() {
    let pipeline = Pipeline::new(fixture_artifacts(), PipelineConfig::default());
    let cases: Vec<PredictionCase> = load_json("prediction_cases.json");
    assert!(cases.len() >= 10);

    run_cases(&pipeline, &cases);
}

#[test]
fn recorded_cases_with_selected_difficulty() {
    let config = PipelineConfig::builder()
        .difficulty(DifficultySource::Selected)
        .build()
        .unwrap();
    let pipeline = Pipeline::new(fixture_artifacts(), config);
    let cases: Vec<PredictionCase> = load_json("selected_difficulty_cases.json");

    run_cases(&pipeline, &cases);

    // Harder roles lower the estimate for these artifacts
    let probabilities: Vec<f64> = cases.iter().filter_map(|c| c.probability).collect();
    assert!(probabilities.windows(2).all(|w| w[0] > w[1]));
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn even_split_scenario() {
    let pipeline = Pipeline::new(fixture_artifacts(), PipelineConfig::default());
    let request = even_split_request();

    let features = pipeline.features(&request).unwrap();
    assert_eq!(
        features.as_array(),
        &[4.0, 1000.0, 1.0, 20.0, 20.0, 20.0, 20.0, 20.0, 100.0]
    );
    let names: Vec<_> = features.named().map(|(name, _)| name).collect();
    assert_eq!(names, FEATURE_NAMES);
    assert_eq!(features.view().len(), N_FEATURES);

    let prediction = pipeline.predict(&request).unwrap();
    assert!((0.0..=1.0).contains(&prediction.probability));
    assert_eq!(
        prediction.outcome == Outcome::Likely,
        prediction.probability >= 0.5
    );
}

#[test]
fn over_allocation_scenario() {
    let pipeline = Pipeline::new(fixture_artifacts(), PipelineConfig::default());
    let request = CampaignRequest::builder()
        .campaign_weeks(4)
        .total_add_budget(1000)
        .allocation([30, 20, 20, 20, 20].into())
        .build();

    assert_eq!(request.sum_budget_pct(), 110);
    let err = pipeline.predict(&request).unwrap_err();
    assert!(matches!(err, PredictError::Validation(_)));
    assert_eq!(err.reason(), "allocation-mismatch");
    assert_eq!(err.to_string(), "Budget distribution must equal 100% (got 110%)");
}

#[test]
fn repeated_predictions_are_identical() {
    let pipeline = Pipeline::new(fixture_artifacts(), PipelineConfig::default());
    let request = even_split_request();

    let first = pipeline.predict(&request).unwrap();
    let second = pipeline.predict(&request).unwrap();
    assert_eq!(first.probability.to_bits(), second.probability.to_bits());
    assert_eq!(first, second);
}

#[test]
fn shared_across_threads() {
    let pipeline = std::sync::Arc::new(Pipeline::new(fixture_artifacts(), PipelineConfig::default()));
    let expected = pipeline.predict(&even_split_request()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || pipeline.predict(&even_split_request()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
