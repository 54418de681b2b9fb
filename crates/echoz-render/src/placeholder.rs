use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use echoz_core::models::context::Context;
use echoz_core::models::template::{ParagraphIndex, Report};

use crate::format;
use crate::markers::MissingMarkers;
use crate::report::{Fragment, ParagraphBody, RenderedParagraph, RenderedReport};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)(?::([^}]+))?\}").expect("placeholder regex is valid")
});

/// A `{NAME}` or `{NAME:FORMAT}` token found in template text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Every placeholder `text` references, in order of appearance.
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|caps| Placeholder {
            name: caps[1].to_string(),
            format: caps.get(2).map(|m| m.as_str().to_string()),
        })
        .collect()
}

/// Outcome of looking up one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Missing(String),
}

/// A piece of template text after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    Literal(&'t str),
    Resolved(String),
    Missing(&'t str),
}

/// Substitutes placeholders with context values.
///
/// Template text is never evaluated; only the token grammar is recognised.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    markers: MissingMarkers,
}

impl Renderer {
    pub fn new(markers: MissingMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &MissingMarkers {
        &self.markers
    }

    /// Resolve a single token against `ctx`.
    ///
    /// A format that does not apply to the value falls back to the plain form.
    pub fn resolve(&self, name: &str, format: Option<&str>, ctx: &Context) -> Resolution {
        let Some(value) = ctx.resolve(name) else {
            return Resolution::Missing(name.to_string());
        };
        let text = format
            .and_then(|spec| format::format_value(value, spec))
            .unwrap_or_else(|| value.to_string());
        Resolution::Resolved(text)
    }

    /// Split `text` into literal runs and resolved tokens.
    pub fn segments<'t>(&self, text: &'t str, ctx: &Context) -> Vec<Segment<'t>> {
        let mut out = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str();
            if whole.start() > last {
                out.push(Segment::Literal(&text[last..whole.start()]));
            }
            let format = caps.get(2).map(|m| m.as_str());
            out.push(match self.resolve(name, format, ctx) {
                Resolution::Resolved(s) => Segment::Resolved(s),
                Resolution::Missing(_) => Segment::Missing(name),
            });
            last = whole.end();
        }
        if last < text.len() {
            out.push(Segment::Literal(&text[last..]));
        }
        out
    }

    pub fn render(&self, text: &str, ctx: &Context) -> String {
        self.segments(text, ctx)
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(s) => s.to_string(),
                Segment::Resolved(s) => s,
                Segment::Missing(name) => self.markers.token(name),
            })
            .collect()
    }

    /// Render every paragraph of `report`, in order.
    ///
    /// Ids absent from `paragraphs` become [`ParagraphBody::Missing`].
    pub fn render_report(
        &self,
        report: &Report,
        ctx: &Context,
        paragraphs: &ParagraphIndex<'_>,
    ) -> RenderedReport {
        let rendered = report
            .paragraph_ids
            .iter()
            .map(|pid| {
                let body = match paragraphs.get(pid.as_str()) {
                    Some(paragraph) => ParagraphBody::Rendered {
                        fragments: self
                            .segments(&paragraph.text, ctx)
                            .into_iter()
                            .map(Fragment::from)
                            .collect(),
                    },
                    None => ParagraphBody::Missing,
                };
                RenderedParagraph {
                    id: pid.clone(),
                    body,
                }
            })
            .collect();

        RenderedReport {
            report_id: report.id.clone(),
            title: report.title.clone(),
            paragraphs: rendered,
        }
    }
}
