use serde::Serialize;
use ts_rs::TS;

use crate::markers::MissingMarkers;
use crate::placeholder::Segment;

/// Rendered paragraph text, kept apart from unresolved tokens until the
/// final text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Fragment {
    Text { text: String },
    Missing { name: String },
}

impl From<Segment<'_>> for Fragment {
    fn from(segment: Segment<'_>) -> Self {
        match segment {
            Segment::Literal(s) => Fragment::Text {
                text: s.to_string(),
            },
            Segment::Resolved(text) => Fragment::Text { text },
            Segment::Missing(name) => Fragment::Missing {
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum ParagraphBody {
    Rendered { fragments: Vec<Fragment> },
    /// The report names a paragraph the configuration does not define.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RenderedParagraph {
    pub id: String,
    pub body: ParagraphBody,
}

impl RenderedParagraph {
    pub fn text(&self, markers: &MissingMarkers) -> String {
        match &self.body {
            ParagraphBody::Rendered { fragments } => fragments
                .iter()
                .map(|fragment| match fragment {
                    Fragment::Text { text } => text.clone(),
                    Fragment::Missing { name } => markers.token(name),
                })
                .collect(),
            ParagraphBody::Missing => markers.paragraph(&self.id),
        }
    }
}

/// Something a report could not fill in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum RenderGap {
    Token { paragraph_id: String, name: String },
    Paragraph { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RenderedReport {
    pub report_id: String,
    pub title: String,
    pub paragraphs: Vec<RenderedParagraph>,
}

impl RenderedReport {
    /// Paragraph texts separated by a blank line.
    pub fn text(&self, markers: &MissingMarkers) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text(markers))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn gaps(&self) -> Vec<RenderGap> {
        let mut gaps = Vec::new();
        for paragraph in &self.paragraphs {
            match &paragraph.body {
                ParagraphBody::Rendered { fragments } => {
                    gaps.extend(fragments.iter().filter_map(|fragment| match fragment {
                        Fragment::Missing { name } => Some(RenderGap::Token {
                            paragraph_id: paragraph.id.clone(),
                            name: name.clone(),
                        }),
                        Fragment::Text { .. } => None,
                    }));
                }
                ParagraphBody::Missing => gaps.push(RenderGap::Paragraph {
                    id: paragraph.id.clone(),
                }),
            }
        }
        gaps
    }

    pub fn is_complete(&self) -> bool {
        self.gaps().is_empty()
    }
}
