use echoz_core::models::measurement::MeasurementSet;
use echoz_norms::error::NormsError;
use echoz_norms::registry::{Parameter, ParameterRegistry};
use echoz_norms::scoring::ScoreCalculator;

fn registry() -> ParameterRegistry {
    ParameterRegistry::from_parameters([
        Parameter::new("ANN", 0.5, 1.48, 0.14),
        Parameter::new("LVEDD", 0.45, 3.89, 0.33),
        Parameter::new("LVSI", 0.0, 1.63, 0.17),
        Parameter::new("BROKEN", 0.5, 1.0, 0.0),
    ])
    .unwrap()
}

#[test]
fn scores_exactly_the_measured_parameters() {
    let registry = registry();
    let measurements: MeasurementSet = [
        ("LVEDD".to_string(), 4.2),
        ("LVSI".to_string(), 1.7),
        ("NOT_A_PARAM".to_string(), 9.0),
    ]
    .into_iter()
    .collect();

    let scores = ScoreCalculator::new(&registry).compute(&measurements, 1.8);
    let keys: Vec<_> = scores.keys().map(String::as_str).collect();
    assert_eq!(keys, ["LVEDD_z", "LVSI_z"]);
    assert!((scores["LVSI_z"] - (1.7 - 1.63) / 0.17).abs() < 1e-12);
}

#[test]
fn failing_parameter_yields_nan_without_aborting() {
    let registry = registry();
    let mut measurements = MeasurementSet::new();
    measurements.insert("BROKEN", 1.0);
    measurements.insert("ANN", 1.5);

    let scores = ScoreCalculator::new(&registry).compute(&measurements, 1.8);
    assert!(scores["BROKEN_z"].is_nan());
    assert!(scores["ANN_z"].is_finite());
}

#[test]
fn single_score_propagates_errors() {
    let registry = registry();
    let calc = ScoreCalculator::new(&registry);

    assert!(matches!(
        calc.score("BROKEN", 1.0, 1.8),
        Err(NormsError::Domain { .. })
    ));
    assert!(matches!(
        calc.score("NOPE", 1.0, 1.8),
        Err(NormsError::UnknownParameter(_))
    ));
    assert!(matches!(
        calc.score("ANN", 1.0, 0.0),
        Err(NormsError::Domain { .. })
    ));
}

#[test]
fn ignored_lists_unknown_measurements() {
    let registry = registry();
    let mut measurements = MeasurementSet::new();
    measurements.insert("ANN", 1.5);
    measurements.insert("XYZ", 2.0);
    assert_eq!(ScoreCalculator::new(&registry).ignored(&measurements), ["XYZ"]);
}
