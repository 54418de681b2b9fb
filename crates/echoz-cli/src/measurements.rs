use echoz_core::models::measurement::{MeasurementSet, parse_field};
use echoz_core::schema;

/// Parse a `NAME=VALUE` command-line measurement.
pub fn parse_assignment(arg: &str) -> Result<(String, f64), String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let name = name.trim();
    if !schema::is_identifier(name) {
        return Err(format!("invalid measurement name '{name}'"));
    }
    let value = parse_field(raw).ok_or_else(|| format!("'{raw}' is not a finite number"))?;
    Ok((name.to_string(), value))
}

/// Build a measurement set; a repeated name keeps its last value.
pub fn collect(pairs: &[(String, f64)]) -> MeasurementSet {
    let mut set = MeasurementSet::new();
    for (name, value) in pairs {
        if let Some(previous) = set.insert(name.clone(), *value) {
            tracing::warn!(name = %name, previous, value, "measurement given twice");
        }
    }
    set
}
