use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::ConfigError;
use crate::schema::{self, key};
use crate::validation::{self, Verdict};

/// A block of report text with placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Paragraph {
    pub id: String,
    /// Display name shown in selection lists.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub text: String,
}

/// An ordered selection of paragraphs.
///
/// Paragraphs are referenced by id and resolved at render time, so a report
/// can outlive (or predate) the paragraphs it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub paragraph_ids: Vec<String>,
}

impl Report {
    /// Keep only the selected paragraphs, in report order. An empty selection
    /// keeps the report unchanged.
    pub fn retain_selected<'a>(&self, selected: impl IntoIterator<Item = &'a str>) -> Report {
        let selected: HashSet<&str> = selected
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if selected.is_empty() {
            return self.clone();
        }
        Report {
            id: self.id.clone(),
            title: self.title.clone(),
            paragraph_ids: self
                .paragraph_ids
                .iter()
                .filter(|pid| selected.contains(pid.as_str()))
                .cloned()
                .collect(),
        }
    }
}

/// Paragraph lookup used while rendering a report.
pub type ParagraphIndex<'a> = HashMap<&'a str, &'a Paragraph>;

/// A report with its paragraphs resolved, for listing in editors.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReportView {
    pub id: String,
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

/// A validated paragraph/report configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateSet {
    pub paragraphs: Vec<Paragraph>,
    pub reports: Vec<Report>,
}

impl TemplateSet {
    /// Build from a decoded document after it passes [`validation::validate`].
    pub fn from_document(doc: &Value) -> Result<Self, ConfigError> {
        let obj = doc.as_object().ok_or(ConfigError::RootNotMapping {
            document: "templates",
        })?;
        schema::check_version(obj, "templates", schema::TEMPLATES_VERSION)?;

        if let Verdict::Rejected(rejection) = validation::validate(doc)? {
            return Err(rejection.into());
        }

        // Shapes were checked by the validator; anything else is skipped.
        let paragraphs = list(obj, key::PARAGRAPHS)
            .filter_map(Value::as_object)
            .map(|p| {
                let description = schema::field_text(p, key::DESCRIPTION).trim().to_string();
                Paragraph {
                    id: schema::field_text(p, key::ID).trim().to_string(),
                    label: schema::field_text(p, key::LABEL).trim().to_string(),
                    description: (!description.is_empty()).then_some(description),
                    text: schema::field_text(p, key::TEXT),
                }
            })
            .collect();

        let reports = list(obj, key::REPORTS)
            .filter_map(Value::as_object)
            .map(|r| Report {
                id: schema::field_text(r, key::ID).trim().to_string(),
                title: schema::field_text(r, key::TITLE).trim().to_string(),
                paragraph_ids: list(r, key::PARAGRAPH_IDS)
                    .filter_map(schema::scalar_text)
                    .map(|pid| pid.trim().to_string())
                    .filter(|pid| !pid.is_empty())
                    .collect(),
            })
            .collect();

        Ok(Self {
            paragraphs,
            reports,
        })
    }

    /// Serialize into the current document shape, version stamped.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut doc = serde_json::Map::new();
        doc.insert(key::VERSION.to_string(), schema::TEMPLATES_VERSION.into());
        doc.insert(
            key::PARAGRAPHS.to_string(),
            serde_json::to_value(&self.paragraphs)?,
        );
        doc.insert(key::REPORTS.to_string(), serde_json::to_value(&self.reports)?);
        Ok(Value::Object(doc))
    }

    pub fn paragraph(&self, id: &str) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|p| p.id == id)
    }

    pub fn report(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// The report front ends select when none was chosen.
    pub fn default_report(&self) -> Option<&Report> {
        self.reports.first()
    }

    pub fn paragraph_index(&self) -> ParagraphIndex<'_> {
        self.paragraphs.iter().map(|p| (p.id.as_str(), p)).collect()
    }

    /// Every report with its paragraphs resolved; dangling ids are dropped.
    pub fn report_views(&self) -> Vec<ReportView> {
        let index = self.paragraph_index();
        self.reports
            .iter()
            .map(|r| ReportView {
                id: r.id.clone(),
                title: r.title.clone(),
                paragraphs: r
                    .paragraph_ids
                    .iter()
                    .filter_map(|pid| index.get(pid.as_str()).map(|p| (*p).clone()))
                    .collect(),
            })
            .collect()
    }

    /// Canonical form for persisting: trimmed ids, no duplicate or blank
    /// paragraph references, paragraphs and reports sorted by id.
    pub fn normalized(&self) -> TemplateSet {
        let mut paragraphs = self.paragraphs.clone();
        for p in &mut paragraphs {
            p.id = p.id.trim().to_string();
        }
        paragraphs.sort_by(|a, b| a.id.cmp(&b.id));

        let mut reports: Vec<Report> = self
            .reports
            .iter()
            .map(|r| {
                let mut seen = HashSet::new();
                Report {
                    id: r.id.trim().to_string(),
                    title: r.title.trim().to_string(),
                    paragraph_ids: r
                        .paragraph_ids
                        .iter()
                        .map(|pid| pid.trim())
                        .filter(|pid| !pid.is_empty() && seen.insert(*pid))
                        .map(str::to_string)
                        .collect(),
                }
            })
            .collect();
        reports.sort_by(|a, b| a.id.cmp(&b.id));

        TemplateSet {
            paragraphs,
            reports,
        }
    }

    /// Guarantee at least one report (and therefore one paragraph) exists.
    pub fn ensure_nonempty(mut self) -> TemplateSet {
        if !self.reports.is_empty() {
            return self;
        }
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph {
                id: "norms".to_string(),
                label: "Norms / source".to_string(),
                description: None,
                text: "Norms: ...".to_string(),
            });
        }
        let first = self.paragraphs[0].id.clone();
        tracing::info!(paragraph = %first, "no reports configured, adding default report");
        self.reports.push(Report {
            id: "default_echo".to_string(),
            title: "Default".to_string(),
            paragraph_ids: vec![first],
        });
        self
    }

    /// The stock echocardiography report.
    pub fn builtin() -> TemplateSet {
        let paragraph = |id: &str, label: &str, text: &str| Paragraph {
            id: id.to_string(),
            label: label.to_string(),
            description: None,
            text: text.to_string(),
        };

        let paragraphs = vec![
            paragraph(
                "norms",
                "Norms / source",
                "Reference values: Pettersen MD et al., J Am Soc Echocardiogr. \
                 2008;21(8):922-34 (Z-scores, Detroit Data).",
            ),
            paragraph("bsa", "BSA", "BSA = {BSA_m2:.2f} m2."),
            paragraph(
                "lv_dims",
                "LV (LVEDD/LVST/LVPWT)",
                "Left ventricular dimension and wall thickness within normal limits: \
                 LVEDD = {LVEDD:.2f} (z = {LVEDD_z:.2f}), \
                 LVST = {LVST:.2f} (z = {LVST_z:.2f}), \
                 LVPWT = {LVPWT:.2f} (z = {LVPWT_z:.2f}).",
            ),
            paragraph(
                "aorta",
                "Aorta (ANN/ROOT/STJ/AAO)",
                "Aorta: annulus {ANN:.2f} (z = {ANN_z:.2f}), \
                 root {ROOT:.2f} (z = {ROOT_z:.2f}), \
                 STJ {STJ:.2f} (z = {STJ_z:.2f}), \
                 ascending aorta {AAO:.2f} (z = {AAO_z:.2f}).",
            ),
            paragraph(
                "pa",
                "Pulmonary artery (MPA/RPA/LPA)",
                "Pulmonary artery: MPA = {MPA:.2f} (z = {MPA_z:.2f}), \
                 RPA = {RPA:.2f} (z = {RPA_z:.2f}), \
                 LPA = {LPA:.2f} (z = {LPA_z:.2f}).",
            ),
            paragraph(
                "conclusion",
                "Conclusions",
                "Conclusions: no evident structural defect. TR and PR within physiological limits.",
            ),
        ];

        let reports = vec![Report {
            id: "default_echo".to_string(),
            title: "Default (short)".to_string(),
            paragraph_ids: paragraphs.iter().map(|p| p.id.clone()).collect(),
        }];

        TemplateSet {
            paragraphs,
            reports,
        }
    }
}

fn list<'a>(
    obj: &'a serde_json::Map<String, Value>,
    name: &str,
) -> impl Iterator<Item = &'a Value> {
    obj.get(name)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
