use echoz_core::models::context::{Context, ContextValue};
use echoz_render::format::{MAX_FIELD, fmt_num, format_value};
use echoz_render::placeholder::Renderer;

fn num(v: f64, spec: &str) -> Option<String> {
    format_value(&ContextValue::Number(v), spec)
}

fn text(s: &str, spec: &str) -> Option<String> {
    format_value(&ContextValue::from(s), spec)
}

#[test]
fn fixed_point() {
    assert_eq!(num(4.2, ".2f").as_deref(), Some("4.20"));
    assert_eq!(num(-2.080665720698631, ".2f").as_deref(), Some("-2.08"));
    assert_eq!(num(3.14159, "f").as_deref(), Some("3.141590"));
    assert_eq!(num(2.7, ".0f").as_deref(), Some("3"));
    assert_eq!(num(2.0, "#.0f").as_deref(), Some("2."));
}

#[test]
fn width_alignment_and_sign() {
    assert_eq!(num(3.14159, ">10.2f").as_deref(), Some("      3.14"));
    assert_eq!(num(3.14159, "<8.1f").as_deref(), Some("3.1     "));
    assert_eq!(num(3.14159, "*^9.2f").as_deref(), Some("**3.14***"));
    assert_eq!(num(-3.14159, "+08.2f").as_deref(), Some("-0003.14"));
    assert_eq!(num(3.14159, "+.1f").as_deref(), Some("+3.1"));
    assert_eq!(num(3.14159, " .1f").as_deref(), Some(" 3.1"));
    assert_eq!(num(-1.5, "=8.1f").as_deref(), Some("-    1.5"));
}

#[test]
fn grouping() {
    assert_eq!(num(1234567.891, ",.2f").as_deref(), Some("1,234,567.89"));
    assert_eq!(num(1234567.891, "_.0f").as_deref(), Some("1_234_568"));
    assert_eq!(num(123.4, ",.1f").as_deref(), Some("123.4"));
}

#[test]
fn exponent_and_general() {
    assert_eq!(num(3.14159, "e").as_deref(), Some("3.141590e+00"));
    assert_eq!(num(0.00012, ".1E").as_deref(), Some("1.2E-04"));
    assert_eq!(num(0.000012345, "g").as_deref(), Some("1.2345e-05"));
    assert_eq!(num(1234567.0, "g").as_deref(), Some("1.23457e+06"));
    assert_eq!(num(0.5, "g").as_deref(), Some("0.5"));
    assert_eq!(num(100.0, ".2g").as_deref(), Some("1e+02"));
}

#[test]
fn empty_type_with_precision() {
    assert_eq!(num(3.14159, ".2").as_deref(), Some("3.1"));
    assert_eq!(num(1234.5, ".2").as_deref(), Some("1.2e+03"));
    assert_eq!(num(3.0, ".2").as_deref(), Some("3.0"));
}

#[test]
fn empty_type_without_precision_is_plain() {
    assert_eq!(num(4.0, "").as_deref(), Some("4.0"));
    assert_eq!(num(4.0, ">6").as_deref(), Some("   4.0"));
}

#[test]
fn percent() {
    assert_eq!(num(0.256, ".1%").as_deref(), Some("25.6%"));
}

#[test]
fn non_finite_values() {
    assert_eq!(num(f64::NAN, ".2f").as_deref(), Some("nan"));
    assert_eq!(num(f64::NAN, ".2F").as_deref(), Some("NAN"));
    assert_eq!(num(f64::INFINITY, ".2f").as_deref(), Some("inf"));
    assert_eq!(num(f64::NEG_INFINITY, "e").as_deref(), Some("-inf"));
}

#[test]
fn text_values() {
    assert_eq!(text("abc", ">6").as_deref(), Some("   abc"));
    assert_eq!(text("abc", "6").as_deref(), Some("abc   "));
    assert_eq!(text("abc", ".2").as_deref(), Some("ab"));
    assert_eq!(text("abc", "s").as_deref(), Some("abc"));
}

#[test]
fn mismatched_or_malformed_specs_are_rejected() {
    assert_eq!(num(4.2, "d"), None);
    assert_eq!(num(4.2, "s"), None);
    assert_eq!(num(4.2, ".2ff"), None);
    assert_eq!(num(4.2, ".f"), None);
    assert_eq!(text("abc", ".2f"), None);
    assert_eq!(text("abc", "+"), None);
    assert_eq!(text("abc", "=5"), None);
    assert_eq!(format_value(&ContextValue::Null, ".2f"), None);
}

#[test]
fn oversized_width_or_precision_is_rejected() {
    for spec in [".70000f", ".70000e", ".70000g", ".70000", ".70000%"] {
        assert_eq!(num(3.14159, spec), None, "{spec}");
    }
    assert_eq!(num(3.14159, "99999999999"), None);
    assert_eq!(num(3.14159, ">99999999999999999999999.2f"), None);
    assert_eq!(text("abc", ".70000"), None);
    assert_eq!(text("abc", "70000"), None);

    let widest = num(1.0, &format!(">{MAX_FIELD}.{MAX_FIELD}f")).unwrap();
    assert_eq!(widest.len(), MAX_FIELD + 2);
    assert!(num(1.0, &format!(".{MAX_FIELD}g")).is_some());
}

#[test]
fn oversized_precision_renders_plain_form() {
    let ctx: Context = [("X", ContextValue::from(3.14159))].into_iter().collect();
    let r = Renderer::default();
    assert_eq!(r.render("{X:.70000f}", &ctx), "3.14159");
    assert_eq!(r.render("{X:.70000e}", &ctx), "3.14159");
    assert_eq!(r.render("X = {X:99999999999}", &ctx), "X = 3.14159");
}

#[test]
fn fmt_num_helper() {
    assert_eq!(fmt_num(Some(1.8256771247769754), 2), "1.83");
    assert_eq!(fmt_num(Some(-0.5), 1), "-0.5");
    assert_eq!(fmt_num(None, 2), "");
    assert_eq!(fmt_num(Some(3.14159), 70_000), "3.14159");
}
