use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use echoz_core::models::measurement::MeasurementSet;
use echoz_core::models::patient::PatientInputs;
use echoz_core::models::template::{Report, TemplateSet};
use echoz_norms::registry::ParameterRegistry;
use echoz_norms::scoring::{DerivedScores, ScoreCalculator};

use crate::context::build_context;
use crate::error::RenderError;
use crate::markers::MissingMarkers;
use crate::placeholder::Renderer;
use crate::report::RenderedReport;

/// One report request as a front end submits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComputationRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub measurements: MeasurementSet,
    /// Falls back to the first configured report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    /// Paragraph ids to keep; `None` or empty keeps the whole report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_paragraphs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReportOutput {
    pub bsa: f64,
    pub scores: DerivedScores,
    pub report: RenderedReport,
    pub text: String,
}

/// Scores measurements and renders reports against a fixed configuration.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    registry: Arc<ParameterRegistry>,
    templates: Arc<TemplateSet>,
    renderer: Renderer,
}

impl ReportEngine {
    pub fn new(registry: Arc<ParameterRegistry>, templates: Arc<TemplateSet>) -> Self {
        Self {
            registry,
            templates,
            renderer: Renderer::default(),
        }
    }

    /// Build from decoded registry and template documents.
    pub fn from_documents(registry: &Value, templates: &Value) -> Result<Self, RenderError> {
        Ok(Self::new(
            Arc::new(ParameterRegistry::from_document(registry)?),
            Arc::new(TemplateSet::from_document(templates)?),
        ))
    }

    pub fn with_markers(mut self, markers: MissingMarkers) -> Self {
        self.renderer = Renderer::new(markers);
        self
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn generate(&self, request: &ComputationRequest) -> Result<ReportOutput, RenderError> {
        let patient = PatientInputs::new(request.weight_kg, request.height_cm)?;
        let report = select_report(
            &self.templates,
            request.report_id.as_deref(),
            request.selected_paragraphs.as_deref(),
        )?;

        let bsa = patient.bsa();
        let scores = ScoreCalculator::new(&self.registry).compute(&request.measurements, bsa);
        let ctx = build_context(&patient, &request.measurements, &scores);
        let rendered = self
            .renderer
            .render_report(&report, &ctx, &self.templates.paragraph_index());
        let text = rendered.text(self.renderer.markers());

        tracing::info!(
            report_id = %rendered.report_id,
            paragraphs = rendered.paragraphs.len(),
            scores = scores.len(),
            gaps = rendered.gaps().len(),
            "report generated"
        );

        Ok(ReportOutput {
            bsa,
            scores,
            report: rendered,
            text,
        })
    }
}

/// Run the whole pipeline over borrowed configuration and return the text.
pub fn generate_report(
    registry: &ParameterRegistry,
    templates: &TemplateSet,
    patient: &PatientInputs,
    measurements: &MeasurementSet,
    report_id: Option<&str>,
    selected_paragraphs: Option<&[String]>,
) -> Result<String, RenderError> {
    let report = select_report(templates, report_id, selected_paragraphs)?;
    let scores = ScoreCalculator::new(registry).compute(measurements, patient.bsa());
    let ctx = build_context(patient, measurements, &scores);
    let renderer = Renderer::default();
    Ok(renderer
        .render_report(&report, &ctx, &templates.paragraph_index())
        .text(renderer.markers()))
}

fn select_report(
    templates: &TemplateSet,
    report_id: Option<&str>,
    selected: Option<&[String]>,
) -> Result<Report, RenderError> {
    let report = match report_id {
        Some(id) => templates
            .report(id)
            .ok_or_else(|| RenderError::UnknownReport(id.to_string()))?,
        None => templates.default_report().ok_or(RenderError::NoReports)?,
    };
    Ok(report.retain_selected(selected.unwrap_or_default().iter().map(String::as_str)))
}
