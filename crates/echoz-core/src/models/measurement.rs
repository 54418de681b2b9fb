use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Raw observed values for one patient, keyed by parameter name.
///
/// The set may be sparse, and may carry names the registry does not know;
/// score computation skips both cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct MeasurementSet {
    values: BTreeMap<String, f64>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Collect values for `names` from raw text fields (e.g. submitted form
    /// inputs). Fields that are absent or do not parse are left out.
    pub fn from_fields<'a, F>(names: impl IntoIterator<Item = &'a str>, mut field: F) -> Self
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let mut set = Self::new();
        for name in names {
            if let Some(value) = field(name).and_then(parse_field) {
                set.insert(name, value);
            }
        }
        set
    }
}

impl FromIterator<(String, f64)> for MeasurementSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MeasurementSet {
    type Item = (&'a String, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Lenient parse of a single raw input field.
///
/// Blank, unparsable, and non-finite input all mean "not measured".
pub fn parse_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
