use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use echoz_core::models::display::DisplaySettings;
use echoz_core::models::template::TemplateSet;
use echoz_core::schema::{TEMPLATES_VERSION, key};
use echoz_norms::NormativeSource;
use echoz_norms::registry::ParameterRegistry;
use echoz_norms::sources::pettersen_detroit::PettersenDetroit;

use crate::io;

/// Overrides the per-user config directory.
pub const CONFIG_DIR_ENV: &str = "ECHOZ_CONFIG_DIR";

const REGISTRY_FILE: &str = "parameters/registry.yaml";
const DISPLAY_FILE: &str = "parameters/display.yaml";
const TEMPLATES_FILE: &str = "reports/templates.yaml";
const PARAGRAPHS_FILE: &str = "reports/paragraphs.yaml";
const REPORTS_FILE: &str = "reports/reports.yaml";

/// On-disk configuration root.
///
/// Every file is optional; anything absent falls back to the built-in
/// registry, templates, or display defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// `$ECHOZ_CONFIG_DIR` if set and non-empty, else `<config dir>/echoz`.
    pub fn resolve() -> eyre::Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(dir));
        }
        let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
        Ok(Self::at(base.join("echoz")))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn paragraphs_path(&self) -> PathBuf {
        self.root.join(PARAGRAPHS_FILE)
    }

    pub fn reports_path(&self) -> PathBuf {
        self.root.join(REPORTS_FILE)
    }

    /// Registry from `explicit`, else the config dir, else the built-in norms.
    pub fn load_registry(&self, explicit: Option<&Path>) -> eyre::Result<ParameterRegistry> {
        match self.pick(explicit, REGISTRY_FILE) {
            Some(path) => {
                let doc = io::read_document(&path)?;
                let registry = ParameterRegistry::from_document(&doc)
                    .map_err(|e| eyre::eyre!("{}: {e}", path.display()))?;
                tracing::debug!(
                    path = %path.display(),
                    parameters = registry.len(),
                    "registry loaded"
                );
                Ok(registry)
            }
            None => Ok(PettersenDetroit.registry().clone()),
        }
    }

    pub fn load_display(&self, explicit: Option<&Path>) -> eyre::Result<DisplaySettings> {
        match self.pick(explicit, DISPLAY_FILE) {
            Some(path) => Ok(DisplaySettings::from_document(&io::read_document(&path)?)),
            None => Ok(DisplaySettings::default()),
        }
    }

    /// Raw template document, before validation.
    ///
    /// Lookup order: `explicit`, the split paragraph/report files, the single
    /// templates file. `None` means the built-in set applies.
    pub fn template_document(&self, explicit: Option<&Path>) -> eyre::Result<Option<Value>> {
        if let Some(path) = explicit {
            return io::read_document(path).map(Some);
        }

        let paragraphs = self.paragraphs_path();
        let reports = self.reports_path();
        if paragraphs.exists() || reports.exists() {
            let read = |p: &Path| -> eyre::Result<Value> {
                if p.exists() {
                    io::read_document(p)
                } else {
                    Ok(Value::Object(Map::new()))
                }
            };
            return merge_split(&read(&paragraphs)?, &read(&reports)?).map(Some);
        }

        let single = self.root.join(TEMPLATES_FILE);
        if single.exists() {
            return io::read_document(&single).map(Some);
        }
        Ok(None)
    }

    pub fn load_templates(&self, explicit: Option<&Path>) -> eyre::Result<TemplateSet> {
        match self.template_document(explicit)? {
            Some(doc) => Ok(TemplateSet::from_document(&doc)?),
            None => Ok(TemplateSet::builtin()),
        }
    }

    /// Persist `templates` in canonical form as the split pair of files.
    pub fn save_templates(&self, templates: &TemplateSet) -> eyre::Result<()> {
        let doc = templates.normalized().to_document()?;
        for (path, section) in [
            (self.paragraphs_path(), key::PARAGRAPHS),
            (self.reports_path(), key::REPORTS),
        ] {
            let mut part = Map::new();
            part.insert(key::VERSION.to_string(), TEMPLATES_VERSION.into());
            part.insert(
                section.to_string(),
                doc.get(section).cloned().unwrap_or(Value::Array(Vec::new())),
            );
            io::write_yaml_atomic(&path, &Value::Object(part))?;
        }
        Ok(())
    }

    fn pick(&self, explicit: Option<&Path>, default: &str) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(self.root.join(default)).filter(|p| p.exists()),
        }
    }
}

/// Combine the split paragraph and report documents into one template
/// document.
///
/// The higher of the two `version` keys is kept so a newer file is never
/// silently read as the current version.
pub fn merge_split(paragraphs: &Value, reports: &Value) -> eyre::Result<Value> {
    let mut doc = Map::new();
    let mut version: Option<Value> = None;

    for (name, part, section) in [
        ("paragraphs", paragraphs, key::PARAGRAPHS),
        ("reports", reports, key::REPORTS),
    ] {
        let obj = match part {
            Value::Object(obj) => obj,
            Value::Null => {
                doc.insert(section.to_string(), Value::Array(Vec::new()));
                continue;
            }
            _ => eyre::bail!("{name} file is not a mapping"),
        };
        doc.insert(
            section.to_string(),
            obj.get(section)
                .cloned()
                .unwrap_or(Value::Array(Vec::new())),
        );
        if let Some(v) = obj.get(key::VERSION) {
            let newer = match (&version, v.as_u64()) {
                (Some(current), Some(n)) => current.as_u64().is_some_and(|c| n > c),
                _ => true,
            };
            if newer {
                version = Some(v.clone());
            }
        }
    }

    if let Some(v) = version {
        doc.insert(key::VERSION.to_string(), v);
    }
    Ok(Value::Object(doc))
}
