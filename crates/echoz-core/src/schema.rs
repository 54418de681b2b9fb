//! Configuration document conventions.
//!
//! Key names, schema versions, and the identifier grammar shared by the
//! parameter registry document and the paragraph/report document. Front ends
//! decode YAML/JSON into a `serde_json::Value` tree; everything in here works
//! on that tree.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ConfigError;

/// Key names used in configuration documents.
pub mod key {
    pub const VERSION: &str = "version";

    pub const PARAGRAPHS: &str = "paragraphs";
    pub const REPORTS: &str = "reports";
    pub const ID: &str = "id";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const TEXT: &str = "text";
    pub const TITLE: &str = "title";
    pub const PARAGRAPH_IDS: &str = "paragraph_ids";

    pub const PARAMETERS: &str = "parameters";
    pub const NAME: &str = "name";
    pub const SCALING_EXPONENT: &str = "scaling_exponent";
    pub const POPULATION_MEAN: &str = "population_mean";
    pub const POPULATION_SD: &str = "population_sd";
    pub const UNIT: &str = "unit";

    pub const PARAMS: &str = "params";
    pub const ENABLED: &str = "enabled";
    pub const ORDER: &str = "order";
}

/// Short aliases accepted for the numeric parameter fields.
pub mod alias {
    pub const SCALING_EXPONENT: &str = "alpha";
    pub const POPULATION_MEAN: &str = "mean";
    pub const POPULATION_SD: &str = "sd";
}

/// Context key holding the patient's body-surface-area.
pub const BSA_KEY: &str = "BSA_m2";

/// Suffix appended to a parameter name to form its derived score key.
pub const SCORE_SUFFIX: &str = "_z";

/// Current paragraph/report document version.
pub const TEMPLATES_VERSION: u32 = 1;

/// Current parameter registry document version.
pub const REGISTRY_VERSION: u32 = 1;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("invalid identifier regex"));

/// Whether `s` is a valid paragraph/report/token identifier.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

/// Derived score key for a parameter, e.g. `LVEDD` → `LVEDD_z`.
pub fn score_key(parameter: &str) -> String {
    format!("{parameter}{SCORE_SUFFIX}")
}

/// Coerce a scalar document value to text.
///
/// Strings are returned as-is, numbers and booleans in their display form.
/// Null, sequences and mappings have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text of `obj[key]`, or empty when absent or not a scalar.
pub fn field_text(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    obj.get(key).and_then(scalar_text).unwrap_or_default()
}

/// Check the optional `version` key of a document against `supported`.
///
/// A missing version is read as the current one. Older versions share the
/// current shape, so there is nothing to migrate yet.
pub fn check_version(
    doc: &serde_json::Map<String, Value>,
    document: &'static str,
    supported: u32,
) -> Result<(), ConfigError> {
    let Some(raw) = doc.get(key::VERSION) else {
        return Ok(());
    };
    let found = raw
        .as_u64()
        .ok_or(ConfigError::InvalidVersion { document })?;
    if found > u64::from(supported) {
        return Err(ConfigError::UnsupportedVersion {
            document,
            found,
            supported,
        });
    }
    Ok(())
}
