use serde::{Deserialize, Serialize};

/// Text wrapped around unresolved names when a report is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingMarkers {
    /// Placed before an unresolved token name (e.g. "###MISSING:").
    pub token_prefix: String,

    pub token_suffix: String,

    /// Placed before the id of a paragraph the report references but the
    /// configuration does not define.
    pub paragraph_prefix: String,

    pub paragraph_suffix: String,
}

impl MissingMarkers {
    pub fn token(&self, name: &str) -> String {
        format!("{}{name}{}", self.token_prefix, self.token_suffix)
    }

    pub fn paragraph(&self, id: &str) -> String {
        format!("{}{id}{}", self.paragraph_prefix, self.paragraph_suffix)
    }
}

impl Default for MissingMarkers {
    fn default() -> Self {
        Self {
            token_prefix: "###MISSING:".to_string(),
            token_suffix: "###".to_string(),
            paragraph_prefix: "###MISSING_PARAGRAPH:".to_string(),
            paragraph_suffix: "###".to_string(),
        }
    }
}
