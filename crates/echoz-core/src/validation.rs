//! Paragraph/report configuration validator.
//!
//! Runs before an edited configuration is persisted or turned into a
//! [`TemplateSet`](crate::models::template::TemplateSet). A configuration that
//! is well-formed but breaks a rule yields [`Verdict::Rejected`]; only a
//! payload that is not a mapping at all is an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use ts_rs::TS;

use crate::error::ConfigError;
use crate::schema::{self, key};

/// The rule a rejected configuration broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Rule {
    /// `paragraphs` and `reports` are not both lists.
    Shape,
    ParagraphEntry,
    InvalidParagraphId,
    DuplicateParagraphId,
    EmptyParagraphText,
    EmptyParagraphLabel,
    ReportEntry,
    InvalidReportId,
    DuplicateReportId,
    EmptyReportTitle,
    ParagraphIdsNotList,
    EmptyParagraphIds,
    /// A report references a paragraph id that does not exist.
    MissingParagraph,
    NoReports,
    NoParagraphs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct Rejection {
    pub rule: Rule,
    /// Id of the offending paragraph or report, when there is one.
    pub entity: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// The rejection message, or an empty string when accepted.
    pub fn message(&self) -> &str {
        match self {
            Verdict::Accepted => "",
            Verdict::Rejected(r) => &r.message,
        }
    }
}

fn reject(rule: Rule, entity: Option<&str>, message: String) -> Verdict {
    Verdict::Rejected(Rejection {
        rule,
        entity: entity.map(str::to_string),
        message,
    })
}

macro_rules! ensure {
    ($cond:expr, $rule:expr, $entity:expr, $($fmt:tt)+) => {
        if !$cond {
            return Ok(reject($rule, $entity, format!($($fmt)+)));
        }
    };
}

/// Check a decoded `{paragraphs: [...], reports: [...]}` document.
///
/// Rules are applied in order and the first failure is returned:
/// shape, paragraph entries, report entries, references, non-emptiness.
pub fn validate(doc: &Value) -> Result<Verdict, ConfigError> {
    let obj = doc.as_object().ok_or(ConfigError::RootNotMapping {
        document: "templates",
    })?;

    let (Some(Value::Array(paragraphs)), Some(Value::Array(reports))) =
        (obj.get(key::PARAGRAPHS), obj.get(key::REPORTS))
    else {
        return Ok(reject(
            Rule::Shape,
            None,
            "payload must contain paragraphs:list and reports:list".to_string(),
        ));
    };

    let mut paragraph_ids: HashSet<String> = HashSet::new();
    for entry in paragraphs {
        let Some(p) = entry.as_object() else {
            return Ok(reject(
                Rule::ParagraphEntry,
                None,
                "paragraph entry invalid".to_string(),
            ));
        };

        let pid = trimmed(p, key::ID);
        ensure!(
            schema::is_identifier(&pid),
            Rule::InvalidParagraphId,
            Some(pid.as_str()),
            "invalid paragraph id: {pid}"
        );
        ensure!(
            !paragraph_ids.contains(&pid),
            Rule::DuplicateParagraphId,
            Some(pid.as_str()),
            "duplicate paragraph id: {pid}"
        );
        ensure!(
            !trimmed(p, key::TEXT).is_empty(),
            Rule::EmptyParagraphText,
            Some(pid.as_str()),
            "paragraph {pid} has empty text"
        );
        ensure!(
            !trimmed(p, key::LABEL).is_empty(),
            Rule::EmptyParagraphLabel,
            Some(pid.as_str()),
            "paragraph {pid} has empty label"
        );
        paragraph_ids.insert(pid);
    }

    let mut report_ids: HashSet<String> = HashSet::new();
    let mut references: Vec<(String, Vec<String>)> = Vec::with_capacity(reports.len());
    for entry in reports {
        let Some(r) = entry.as_object() else {
            return Ok(reject(
                Rule::ReportEntry,
                None,
                "report entry invalid".to_string(),
            ));
        };

        let rid = trimmed(r, key::ID);
        ensure!(
            schema::is_identifier(&rid),
            Rule::InvalidReportId,
            Some(rid.as_str()),
            "invalid report id: {rid}"
        );
        ensure!(
            !report_ids.contains(&rid),
            Rule::DuplicateReportId,
            Some(rid.as_str()),
            "duplicate report id: {rid}"
        );
        ensure!(
            !trimmed(r, key::TITLE).is_empty(),
            Rule::EmptyReportTitle,
            Some(rid.as_str()),
            "report {rid} has empty title"
        );

        let pids = match r.get(key::PARAGRAPH_IDS) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(schema::scalar_text)
                .map(|pid| pid.trim().to_string())
                .filter(|pid| !pid.is_empty())
                .collect::<Vec<_>>(),
            None => Vec::new(),
            Some(_) => {
                return Ok(reject(
                    Rule::ParagraphIdsNotList,
                    Some(rid.as_str()),
                    format!("report {rid} paragraph_ids must be list"),
                ));
            }
        };
        ensure!(
            !pids.is_empty(),
            Rule::EmptyParagraphIds,
            Some(rid.as_str()),
            "report {rid} has empty paragraph_ids"
        );

        report_ids.insert(rid.clone());
        references.push((rid, pids));
    }

    for (rid, pids) in &references {
        if let Some(missing) = pids.iter().find(|pid| !paragraph_ids.contains(*pid)) {
            return Ok(reject(
                Rule::MissingParagraph,
                Some(rid.as_str()),
                format!("report {rid} references missing paragraph: {missing}"),
            ));
        }
    }

    ensure!(
        !report_ids.is_empty(),
        Rule::NoReports,
        None,
        "no reports defined"
    );
    ensure!(
        !paragraph_ids.is_empty(),
        Rule::NoParagraphs,
        None,
        "no paragraphs defined"
    );

    Ok(Verdict::Accepted)
}

fn trimmed(obj: &Map<String, Value>, name: &str) -> String {
    schema::field_text(obj, name).trim().to_string()
}
