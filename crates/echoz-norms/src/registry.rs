use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use echoz_core::error::{ConfigError, DomainError};
use echoz_core::schema::{self, alias, key};

use crate::transform;

/// Statistical constants for one measured parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Parameter {
    pub name: String,
    /// Allometric exponent applied to body-surface-area (`alpha`).
    pub scaling_exponent: f64,
    pub population_mean: f64,
    pub population_sd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, scaling_exponent: f64, mean: f64, sd: f64) -> Self {
        Self {
            name: name.into(),
            scaling_exponent,
            population_mean: mean,
            population_sd: sd,
            description: None,
            unit: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn z_score(&self, value: f64, bsa: f64) -> Result<f64, DomainError> {
        transform::normalize(
            value,
            bsa,
            self.scaling_exponent,
            self.population_mean,
            self.population_sd,
        )
    }
}

/// Immutable name → [`Parameter`] lookup.
///
/// Iteration is always in lexical name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterRegistry {
    params: BTreeMap<String, Parameter>,
}

impl ParameterRegistry {
    pub fn from_parameters(
        params: impl IntoIterator<Item = Parameter>,
    ) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for param in params {
            match map.entry(param.name.clone()) {
                Entry::Occupied(_) => return Err(ConfigError::DuplicateParameter(param.name)),
                Entry::Vacant(slot) => {
                    if param.population_sd == 0.0 {
                        tracing::warn!(
                            parameter = %param.name,
                            "parameter has zero standard deviation; its score will be NaN"
                        );
                    }
                    slot.insert(param);
                }
            }
        }
        Ok(Self { params: map })
    }

    /// Build from a decoded registry document.
    ///
    /// `parameters` is either a list of entries carrying a `name`, or a
    /// mapping from name to entry.
    pub fn from_document(doc: &Value) -> Result<Self, ConfigError> {
        let root = doc.as_object().ok_or(ConfigError::RootNotMapping {
            document: "registry",
        })?;
        schema::check_version(root, "registry", schema::REGISTRY_VERSION)?;

        let section = root
            .get(key::PARAMETERS)
            .ok_or(ConfigError::MissingSection(key::PARAMETERS))?;

        let params = match section {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let entry = item
                        .as_object()
                        .ok_or(ConfigError::ParameterNotMapping { index })?;
                    let name = schema::field_text(entry, key::NAME).trim().to_string();
                    if name.is_empty() {
                        return Err(ConfigError::UnnamedParameter { index });
                    }
                    parse_entry(name, entry)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Value::Object(items) => items
                .iter()
                .enumerate()
                .map(|(index, (name, item))| {
                    let entry = item
                        .as_object()
                        .ok_or(ConfigError::ParameterNotMapping { index })?;
                    let key_name = name.trim();
                    if key_name.is_empty() {
                        return Err(ConfigError::UnnamedParameter { index });
                    }
                    let declared = schema::field_text(entry, key::NAME).trim().to_string();
                    if !declared.is_empty() && declared != key_name {
                        return Err(ConfigError::NameMismatch {
                            key: name.clone(),
                            name: declared,
                        });
                    }
                    parse_entry(key_name.to_string(), entry)
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(ConfigError::WrongShape {
                    section: key::PARAMETERS,
                    expected: "a list or a mapping",
                });
            }
        };

        Self::from_parameters(params)
    }

    /// Serialize into the list-shaped registry document.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut doc = Map::new();
        doc.insert(key::VERSION.to_string(), schema::REGISTRY_VERSION.into());
        doc.insert(
            key::PARAMETERS.to_string(),
            serde_json::to_value(self.params.values().collect::<Vec<_>>())?,
        );
        Ok(Value::Object(doc))
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    /// All parameter names, lexically sorted.
    pub fn names(&self) -> Vec<&str> {
        self.params.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn parse_entry(name: String, entry: &Map<String, Value>) -> Result<Parameter, ConfigError> {
    let scaling_exponent = number(
        &name,
        entry,
        key::SCALING_EXPONENT,
        alias::SCALING_EXPONENT,
    )?;
    let population_mean = number(&name, entry, key::POPULATION_MEAN, alias::POPULATION_MEAN)?;
    let population_sd = number(&name, entry, key::POPULATION_SD, alias::POPULATION_SD)?;

    for (field, value) in [
        (key::SCALING_EXPONENT, scaling_exponent),
        (key::POPULATION_SD, population_sd),
    ] {
        if value < 0.0 {
            return Err(ConfigError::Negative {
                parameter: name,
                field,
                value,
            });
        }
    }

    let optional = |k: &str| {
        let text = schema::field_text(entry, k).trim().to_string();
        (!text.is_empty()).then_some(text)
    };

    Ok(Parameter {
        description: optional(key::DESCRIPTION),
        unit: optional(key::UNIT),
        name,
        scaling_exponent,
        population_mean,
        population_sd,
    })
}

/// Read a required real field, accepting its short alias and numeric strings.
fn number(
    parameter: &str,
    entry: &Map<String, Value>,
    field: &'static str,
    short: &str,
) -> Result<f64, ConfigError> {
    let raw = entry
        .get(field)
        .or_else(|| entry.get(short))
        .filter(|v| !v.is_null())
        .ok_or_else(|| ConfigError::MissingField {
            parameter: parameter.to_string(),
            field,
        })?;

    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::NotANumber {
            parameter: parameter.to_string(),
            field,
        })
}
