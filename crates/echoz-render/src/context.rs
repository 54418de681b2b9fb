use echoz_core::models::context::Context;
use echoz_core::models::measurement::MeasurementSet;
use echoz_core::models::patient::PatientInputs;
use echoz_core::schema::BSA_KEY;
use echoz_norms::scoring::DerivedScores;

/// Assemble the render context for one computation.
///
/// Sources are layered BSA, then raw measurements, then derived scores; a
/// later source overrides an earlier one on a key collision.
pub fn build_context(
    patient: &PatientInputs,
    measurements: &MeasurementSet,
    scores: &DerivedScores,
) -> Context {
    let mut ctx = Context::new();
    ctx.insert(BSA_KEY, patient.bsa());
    ctx.merge("measurements", measurements.iter());
    ctx.merge("scores", scores.iter().map(|(k, v)| (k.as_str(), *v)));
    ctx
}
