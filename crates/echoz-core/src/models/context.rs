use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A value a placeholder token can resolve to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ContextValue {
    Number(f64),
    Text(String),
    Null,
}

impl From<f64> for ContextValue {
    fn from(v: f64) -> Self {
        ContextValue::Number(v)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        ContextValue::Text(v.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(v: String) -> Self {
        ContextValue::Text(v)
    }
}

impl<T: Into<ContextValue>> From<Option<T>> for ContextValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ContextValue::Null, Into::into)
    }
}

/// Plain string form: text as-is, reals in their shortest round-trip form
/// (`4.0`, `3.14159`, `1e-05`, `nan`).
impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Number(v) => f.write_str(&plain_number(*v)),
            ContextValue::Text(s) => f.write_str(s),
            ContextValue::Null => f.write_str("None"),
        }
    }
}

/// Shortest round-trip text for a real, switching to exponent notation
/// outside `[1e-4, 1e16)`.
pub fn plain_number(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(&format!("{v:e}"));
    }
    let s = v.to_string();
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Rewrite Rust exponent output (`1.5e-5`) into the two-digit signed form
/// (`1.5e-05`).
pub fn exponent_form(rust: &str) -> String {
    let Some((mantissa, exp)) = rust.split_once(['e', 'E']) else {
        return rust.to_string();
    };
    let marker = if rust.contains('E') { 'E' } else { 'e' };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp.trim_start_matches('+')),
    };
    format!("{mantissa}{marker}{sign}{digits:0>2}")
}

/// Flat token → value mapping a template is rendered against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Context {
    entries: BTreeMap<String, ContextValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Option<ContextValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Merge `source` into this context; entries from `source` win.
    ///
    /// Every overwritten key is logged, since the naming conventions are
    /// supposed to keep sources disjoint.
    pub fn merge<K, V>(&mut self, source_name: &str, source: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        for (k, v) in source {
            let key = k.into();
            if let Some(previous) = self.entries.insert(key.clone(), v.into()) {
                tracing::warn!(
                    key = %key,
                    source = source_name,
                    previous = %previous,
                    "context key overridden"
                );
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.entries.get(name)
    }

    /// The value for `name`, unless it is absent or null.
    pub fn resolve(&self, name: &str) -> Option<&ContextValue> {
        self.entries
            .get(name)
            .filter(|v| !matches!(v, ContextValue::Null))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
