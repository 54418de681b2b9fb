use serde::Serialize;
use ts_rs::TS;

use crate::error::DomainError;

/// Per-request patient attributes.
///
/// Both inputs are validated on construction; body-surface-area is derived
/// from them on every call rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PatientInputs {
    weight_kg: f64,
    height_cm: f64,
}

impl PatientInputs {
    pub fn new(weight_kg: f64, height_cm: f64) -> Result<Self, DomainError> {
        positive("weight_kg", weight_kg)?;
        positive("height_cm", height_cm)?;
        Ok(Self {
            weight_kg,
            height_cm,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Body-surface-area in m².
    pub fn bsa(&self) -> f64 {
        body_surface_area(self.weight_kg, self.height_cm)
    }
}

/// Haycock body-surface-area formula (m²).
pub fn body_surface_area(weight_kg: f64, height_cm: f64) -> f64 {
    0.024265 * weight_kg.powf(0.5378) * height_cm.powf(0.3964)
}

fn positive(field: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositiveInput { field, value })
    }
}
