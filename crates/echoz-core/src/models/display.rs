use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::schema::{self, key};

/// Order given to parameters that have no explicit setting in a document.
pub const DEFAULT_ORDER: i64 = 9999;

/// How one parameter's input field is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParameterDisplay {
    pub name: String,
    pub enabled: bool,
    pub order: i64,
}

/// Per-parameter visibility and ordering preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplaySettings {
    pub params: Vec<ParameterDisplay>,
}

impl DisplaySettings {
    /// Read settings from a `{params: [{name, enabled, order}]}` document.
    ///
    /// These are presentation preferences, so bad entries are skipped and bad
    /// fields fall back to defaults instead of failing the load.
    pub fn from_document(doc: &Value) -> Self {
        let items = doc
            .get(key::PARAMS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut params: Vec<ParameterDisplay> = Vec::new();
        for item in items {
            let Some(obj) = item.as_object() else {
                continue;
            };
            let name = schema::field_text(obj, key::NAME).trim().to_string();
            if name.is_empty() {
                continue;
            }
            let enabled = obj
                .get(key::ENABLED)
                .and_then(Value::as_bool)
                .unwrap_or(true);
            let order = obj.get(key::ORDER).and_then(order_of).unwrap_or(DEFAULT_ORDER);

            // Later entries for the same name win.
            params.retain(|p| p.name != name);
            params.push(ParameterDisplay {
                name,
                enabled,
                order,
            });
        }
        Self { params }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDisplay> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Split `names` (in registry order) into visible and hidden lists,
    /// each sorted by `(order, name)`.
    ///
    /// Parameters without a setting are visible, ordered by registry position
    /// in steps of ten so new entries can be slotted between them.
    pub fn split_and_sort<'a>(&self, names: &[&'a str]) -> (Vec<&'a str>, Vec<&'a str>) {
        let configured: HashMap<&str, &ParameterDisplay> =
            self.params.iter().map(|p| (p.name.as_str(), p)).collect();

        let mut visible = Vec::new();
        let mut hidden = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let default_order = (i as i64 + 1) * 10;
            let (enabled, order) = configured
                .get(name)
                .map_or((true, default_order), |p| (p.enabled, p.order));
            let bucket = if enabled { &mut visible } else { &mut hidden };
            bucket.push((order, *name));
        }

        visible.sort();
        hidden.sort();
        (
            visible.into_iter().map(|(_, n)| n).collect(),
            hidden.into_iter().map(|(_, n)| n).collect(),
        )
    }

    /// Settings sorted by parameter name.
    pub fn normalized(&self) -> DisplaySettings {
        let mut params = self.params.clone();
        params.sort_by(|a, b| a.name.cmp(&b.name));
        DisplaySettings { params }
    }
}

fn order_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
