use std::path::Path;

use heartrisk_core::inputs::PatientInputs;
use heartrisk_core::record::PatientRecord;
use heartrisk_core::schema::ChestPain;
use heartrisk_model::artifact::{ClassifierArtifact, Estimator};
use heartrisk_model::error::ModelError;
use heartrisk_model::Predictor;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/tiny_forest.json");

fn record(inputs: PatientInputs) -> PatientRecord {
    inputs.collect().unwrap()
}

fn parse(json: &str) -> Result<ClassifierArtifact, ModelError> {
    ClassifierArtifact::from_slice(json.as_bytes(), Path::new("inline.json"))
}

#[test]
fn forest_averages_leaf_distributions() {
    let artifact = ClassifierArtifact::from_path(Path::new(FIXTURE)).unwrap();
    assert_eq!(artifact.estimator.kind(), "random_forest");

    // cp=2 and thalach=130 land on [10, 30]; ca=0 lands on [40, 10].
    let p = artifact
        .predict_probability(&record(PatientInputs::default()))
        .unwrap();
    assert!((p - 0.475).abs() < 1e-12, "got {p}");

    let typical = PatientInputs {
        cp: ChestPain::TypicalAngina,
        ..PatientInputs::default()
    };
    let p = artifact.predict_probability(&record(typical)).unwrap();
    assert!((p - 0.225).abs() < 1e-12, "got {p}");

    let vessels = PatientInputs {
        ca: 2,
        thalach: 170,
        ..PatientInputs::default()
    };
    let p = artifact.predict_probability(&record(vessels)).unwrap();
    assert!((p - 0.7).abs() < 1e-12, "got {p}");
}

#[test]
fn logistic_regression_binds_coefficients_by_name() {
    let artifact = parse(
        r#"{
            "model_type": "logistic_regression",
            "feature_names": ["thal", "ca"],
            "intercept": -1.0,
            "coefficients": { "ca": 1.0 }
        }"#,
    )
    .unwrap();
    assert!(matches!(artifact.estimator, Estimator::LogisticRegression { .. }));

    let p = artifact
        .predict_probability(&record(PatientInputs::default()))
        .unwrap();
    assert!((p - 1.0 / (1.0 + 1.0_f64.exp())).abs() < 1e-12);

    let p = artifact
        .predict_probability(&record(PatientInputs {
            ca: 2,
            ..PatientInputs::default()
        }))
        .unwrap();
    assert!((p - 1.0 / (1.0 + (-1.0_f64).exp())).abs() < 1e-12);
}

#[test]
fn missing_file_is_not_found() {
    let err = ClassifierArtifact::from_path(Path::new("/nonexistent/model.json")).unwrap_err();
    assert!(matches!(err, ModelError::ArtifactNotFound { .. }));
}

#[test]
fn malformed_json_is_invalid() {
    let err = parse("{ not json").unwrap_err();
    assert!(matches!(err, ModelError::ArtifactInvalid { .. }));
}

#[test]
fn features_outside_the_schema_are_rejected() {
    let err = parse(
        r#"{ "model_type": "logistic_regression", "feature_names": ["age", "target"],
             "intercept": 0.0, "coefficients": {} }"#,
    )
    .unwrap_err();
    match err {
        ModelError::ArtifactInvalid { reason, .. } => assert!(reason.contains("target")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn split_on_undeclared_feature_is_rejected() {
    let err = parse(
        r#"{ "model_type": "random_forest", "feature_names": ["age"],
             "trees": [ { "nodes": [
                 { "feature": "chol", "threshold": 200.0, "left": 1, "right": 2 },
                 { "value": [1.0, 0.0] }, { "value": [0.0, 1.0] } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::ArtifactInvalid { .. }));
}

#[test]
fn backward_child_index_is_rejected() {
    let err = parse(
        r#"{ "model_type": "random_forest", "feature_names": ["age"],
             "trees": [ { "nodes": [
                 { "feature": "age", "threshold": 50.0, "left": 0, "right": 1 },
                 { "value": [1.0, 1.0] } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::ArtifactInvalid { .. }));
}

#[test]
fn empty_leaf_distribution_is_rejected() {
    let err = parse(
        r#"{ "model_type": "random_forest", "feature_names": ["age"],
             "trees": [ { "nodes": [ { "value": [0.0, 0.0] } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::ArtifactInvalid { .. }));
}

#[test]
fn dangling_child_at_scoring_time_is_an_artifact_defect() {
    // Deserializing directly skips load-time validation.
    let artifact: ClassifierArtifact = serde_json::from_str(
        r#"{ "model_type": "random_forest", "feature_names": ["age"],
             "trees": [ { "nodes": [
                 { "feature": "age", "threshold": 50.0, "left": 1, "right": 7 },
                 { "value": [1.0, 1.0] } ] } ] }"#,
    )
    .unwrap();

    let err = artifact
        .predict_probability(&record(PatientInputs::default()))
        .unwrap_err();
    match err {
        ModelError::ArtifactInvalid { reason, .. } => assert!(reason.contains("node 7")),
        other => panic!("unexpected error: {other:?}"),
    }
}
