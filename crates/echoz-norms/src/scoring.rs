use std::collections::BTreeMap;

use echoz_core::models::measurement::MeasurementSet;
use echoz_core::schema;

use crate::error::NormsError;
use crate::registry::ParameterRegistry;

/// Derived scores keyed `<parameter>_z`.
pub type DerivedScores = BTreeMap<String, f64>;

/// Applies the allometric transform across a measurement set.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCalculator<'a> {
    registry: &'a ParameterRegistry,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(registry: &'a ParameterRegistry) -> Self {
        Self { registry }
    }

    /// Score every registry parameter present in `measurements`.
    ///
    /// Parameters without a measurement are skipped. A parameter whose
    /// transform fails gets a NaN score; the rest of the batch is unaffected.
    pub fn compute(&self, measurements: &MeasurementSet, bsa: f64) -> DerivedScores {
        let mut out = DerivedScores::new();
        for param in self.registry.iter() {
            let Some(value) = measurements.get(&param.name) else {
                continue;
            };
            let score = match param.z_score(value, bsa) {
                Ok(z) => z,
                Err(e) => {
                    tracing::warn!(parameter = %param.name, error = %e, "z-score failed");
                    f64::NAN
                }
            };
            out.insert(schema::score_key(&param.name), score);
        }

        let ignored = self.ignored(measurements);
        if !ignored.is_empty() {
            tracing::debug!(?ignored, "measurements without a registry parameter");
        }
        out
    }

    /// Score a single parameter, propagating any failure.
    pub fn score(&self, name: &str, value: f64, bsa: f64) -> Result<f64, NormsError> {
        let param = self
            .registry
            .get(name)
            .ok_or_else(|| NormsError::UnknownParameter(name.to_string()))?;
        param.z_score(value, bsa).map_err(|source| NormsError::Domain {
            parameter: name.to_string(),
            source,
        })
    }

    /// Measurement names the registry does not define.
    pub fn ignored<'m>(&self, measurements: &'m MeasurementSet) -> Vec<&'m str> {
        measurements
            .iter()
            .map(|(name, _)| name)
            .filter(|name| self.registry.get(name).is_none())
            .collect()
    }
}
