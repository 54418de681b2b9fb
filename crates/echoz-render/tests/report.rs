use echoz_core::models::context::Context;
use echoz_core::models::template::{Paragraph, ParagraphIndex, Report};
use echoz_render::markers::MissingMarkers;
use echoz_render::placeholder::Renderer;
use echoz_render::report::{ParagraphBody, RenderGap};

fn paragraph(id: &str, text: &str) -> Paragraph {
    Paragraph {
        id: id.to_string(),
        label: id.to_uppercase(),
        description: None,
        text: text.to_string(),
    }
}

fn report(ids: &[&str]) -> Report {
    Report {
        id: "r".to_string(),
        title: "R".to_string(),
        paragraph_ids: ids.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn renders_paragraphs_in_order_with_blank_lines() {
    let paragraphs = [paragraph("a", "A={A:.1f}"), paragraph("b", "B={B}")];
    let index: ParagraphIndex = paragraphs.iter().map(|p| (p.id.as_str(), p)).collect();
    let ctx: Context = [("A", 1.26), ("B", 2.0)].into_iter().collect();

    let rendered = Renderer::default().render_report(&report(&["b", "a", "b"]), &ctx, &index);
    assert_eq!(rendered.report_id, "r");
    assert_eq!(
        rendered.text(&MissingMarkers::default()),
        "B=2.0\n\nA=1.3\n\nB=2.0"
    );
    assert!(rendered.is_complete());
}

#[test]
fn missing_paragraph_and_tokens_are_reported_as_gaps() {
    let paragraphs = [paragraph("a", "A={A} and {Q}")];
    let index: ParagraphIndex = paragraphs.iter().map(|p| (p.id.as_str(), p)).collect();
    let ctx: Context = [("A", 1.0)].into_iter().collect();

    let rendered = Renderer::default().render_report(&report(&["a", "gone"]), &ctx, &index);
    assert_eq!(rendered.paragraphs[1].body, ParagraphBody::Missing);
    assert_eq!(
        rendered.text(&MissingMarkers::default()),
        "A=1.0 and ###MISSING:Q###\n\n###MISSING_PARAGRAPH:gone###"
    );
    assert_eq!(
        rendered.gaps(),
        vec![
            RenderGap::Token {
                paragraph_id: "a".to_string(),
                name: "Q".to_string(),
            },
            RenderGap::Paragraph {
                id: "gone".to_string(),
            },
        ]
    );
}

#[test]
fn serializes_with_tagged_bodies() {
    let paragraphs = [paragraph("a", "x{Q}")];
    let index: ParagraphIndex = paragraphs.iter().map(|p| (p.id.as_str(), p)).collect();
    let rendered =
        Renderer::default().render_report(&report(&["a", "gone"]), &Context::new(), &index);

    let json = serde_json::to_value(&rendered).unwrap();
    assert_eq!(json["paragraphs"][0]["body"]["status"], "rendered");
    assert_eq!(
        json["paragraphs"][0]["body"]["fragments"][1],
        serde_json::json!({ "kind": "missing", "name": "Q" })
    );
    assert_eq!(json["paragraphs"][1]["body"]["status"], "missing");
}
