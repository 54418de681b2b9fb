use echoz_core::models::context::{Context, ContextValue};
use echoz_render::markers::MissingMarkers;
use echoz_render::placeholder::{Placeholder, Renderer, Resolution, Segment, placeholders};

fn ctx() -> Context {
    [
        ("LVEDD", ContextValue::from(4.2)),
        ("LVEDD_z", ContextValue::from(-2.080665720698631)),
        ("TINY", ContextValue::from(0.00001)),
        ("NOTE", ContextValue::from("normal")),
        ("EMPTY", ContextValue::Null),
    ]
    .into_iter()
    .collect()
}

#[test]
fn text_without_placeholders_is_unchanged() {
    let r = Renderer::default();
    let text = "No tokens here.\nSecond line with {braces and spaces} and {}.";
    assert_eq!(r.render(text, &ctx()), text);
}

#[test]
fn plain_form_without_format() {
    let r = Renderer::default();
    assert_eq!(r.render("{LVEDD}", &ctx()), "4.2");
    assert_eq!(r.render("{TINY}", &ctx()), "1e-05");
    assert_eq!(r.render("{NOTE}", &ctx()), "normal");
}

#[test]
fn plain_and_fixed_forms_of_the_same_value() {
    let ctx: Context = [("X", ContextValue::from(3.14159))].into_iter().collect();
    let r = Renderer::default();
    assert_eq!(r.render("{X}", &ctx), "3.14159");
    assert_eq!(r.render("{X:.2f}", &ctx), "3.14");
}

#[test]
fn applies_format_spec() {
    let r = Renderer::default();
    assert_eq!(
        r.render("LVEDD = {LVEDD:.2f} (z = {LVEDD_z:.2f})", &ctx()),
        "LVEDD = 4.20 (z = -2.08)"
    );
}

#[test]
fn bad_format_falls_back_to_plain() {
    let r = Renderer::default();
    assert_eq!(r.render("{LVEDD:d}", &ctx()), "4.2");
    assert_eq!(r.render("{NOTE:.2f}", &ctx()), "normal");
    assert_eq!(r.render("{LVEDD:??}", &ctx()), "4.2");
}

#[test]
fn absent_or_null_tokens_render_sentinel() {
    let r = Renderer::default();
    assert_eq!(r.render("a {RVD:.2f} b", &ctx()), "a ###MISSING:RVD### b");
    assert_eq!(r.render("{EMPTY}", &ctx()), "###MISSING:EMPTY###");
}

#[test]
fn custom_markers() {
    let r = Renderer::new(MissingMarkers {
        token_prefix: "[?".to_string(),
        token_suffix: "]".to_string(),
        ..MissingMarkers::default()
    });
    assert_eq!(r.render("{RVD}", &ctx()), "[?RVD]");
}

#[test]
fn segments_keep_missing_tokens_tagged() {
    let r = Renderer::default();
    let segments = r.segments("x={LVEDD:.1f}, y={RVD}.", &ctx());
    assert_eq!(
        segments,
        vec![
            Segment::Literal("x="),
            Segment::Resolved("4.2".to_string()),
            Segment::Literal(", y="),
            Segment::Missing("RVD"),
            Segment::Literal("."),
        ]
    );
}

#[test]
fn resolve_single_token() {
    let r = Renderer::default();
    assert_eq!(
        r.resolve("LVEDD", Some(".3f"), &ctx()),
        Resolution::Resolved("4.200".to_string())
    );
    assert_eq!(
        r.resolve("RVD", None, &ctx()),
        Resolution::Missing("RVD".to_string())
    );
}

#[test]
fn lists_placeholders_in_order() {
    let found = placeholders("{BSA_m2:.2f} then {LVEDD} then {LVEDD_z:.2f} {not valid}");
    assert_eq!(
        found,
        vec![
            Placeholder {
                name: "BSA_m2".to_string(),
                format: Some(".2f".to_string()),
            },
            Placeholder {
                name: "LVEDD".to_string(),
                format: None,
            },
            Placeholder {
                name: "LVEDD_z".to_string(),
                format: Some(".2f".to_string()),
            },
        ]
    );
}
