use echoz_core::error::DomainError;

/// Allometric Z-score of `value` for a patient with body-surface-area `bsa`.
///
/// The value is first indexed by `bsa^exponent`, then standardised against
/// the population mean and SD. An exponent of zero applies no scaling.
pub fn normalize(
    value: f64,
    bsa: f64,
    exponent: f64,
    mean: f64,
    sd: f64,
) -> Result<f64, DomainError> {
    if sd == 0.0 {
        return Err(DomainError::ZeroStandardDeviation);
    }
    if !(bsa > 0.0) {
        return Err(DomainError::NonPositiveBodySurfaceArea(bsa));
    }

    let scale = if exponent == 0.0 { 1.0 } else { bsa.powf(exponent) };
    let indexed = value / scale;
    Ok((indexed - mean) / sd)
}
