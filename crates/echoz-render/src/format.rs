//! Format specifiers for placeholder values.
//!
//! Implements the usual `[[fill]align][sign][#][0][width][,|_][.precision][type]`
//! mini-language for reals and text. Supported types are `f F e E g G n %`
//! for reals and `s` for text; an empty type means the general form for
//! reals and plain text otherwise.
//!
//! Formatting returns `None` when the specifier is malformed, does not apply
//! to the value's type, or asks for a width or precision above [`MAX_FIELD`];
//! callers fall back to the plain string form.

use echoz_core::models::context::{ContextValue, exponent_form, plain_number};

/// Largest accepted width or precision.
pub const MAX_FIELD: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits.
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    sign: Option<Sign>,
    alternate: bool,
    zero: bool,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<char>,
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

impl FormatSpec {
    fn parse(spec: &str) -> Option<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;
        let mut out = FormatSpec {
            fill: None,
            align: None,
            sign: None,
            alternate: false,
            zero: false,
            width: 0,
            grouping: None,
            precision: None,
            kind: None,
        };

        if let Some(align) = chars.get(1).copied().and_then(align_of) {
            out.fill = Some(chars[0]);
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            out.align = Some(align);
            i = 1;
        }

        out.sign = match chars.get(i) {
            Some('+') => Some(Sign::Plus),
            Some('-') => Some(Sign::Minus),
            Some(' ') => Some(Sign::Space),
            _ => None,
        };
        if out.sign.is_some() {
            i += 1;
        }

        if chars.get(i) == Some(&'#') {
            out.alternate = true;
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }

        let (width, next) = digits(&chars, i);
        if next > i {
            out.width = width.filter(|w| *w <= MAX_FIELD)?;
        }
        i = next;

        if let Some(&sep @ (',' | '_')) = chars.get(i) {
            out.grouping = Some(sep);
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            let (precision, next) = digits(&chars, i + 1);
            out.precision = Some(precision.filter(|p| *p <= MAX_FIELD)?);
            i = next;
        }

        match &chars[i..] {
            [] => {}
            [kind] => out.kind = Some(*kind),
            _ => return None,
        }
        Some(out)
    }
}

fn digits(chars: &[char], start: usize) -> (Option<usize>, usize) {
    let end = chars[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |n| start + n);
    let text: String = chars[start..end].iter().collect();
    (text.parse().ok(), end)
}

/// Format `value` according to `spec`, or `None` if the two do not fit.
pub fn format_value(value: &ContextValue, spec: &str) -> Option<String> {
    let spec = FormatSpec::parse(spec)?;
    match value {
        ContextValue::Number(v) => format_number(*v, &spec),
        ContextValue::Text(s) => format_text(s, &spec),
        ContextValue::Null => None,
    }
}

/// Fixed-point text for an optional number; empty when absent.
pub fn fmt_num(value: Option<f64>, ndigits: usize) -> String {
    value.map_or_else(String::new, |v| {
        if ndigits > MAX_FIELD {
            return plain_number(v);
        }
        format_number(
            v,
            &FormatSpec {
                fill: None,
                align: None,
                sign: None,
                alternate: false,
                zero: false,
                width: 0,
                grouping: None,
                precision: Some(ndigits),
                kind: Some('f'),
            },
        )
        .unwrap_or_else(|| plain_number(v))
    })
}

fn format_text(s: &str, spec: &FormatSpec) -> Option<String> {
    if !matches!(spec.kind, None | Some('s')) {
        return None;
    }
    if spec.sign.is_some()
        || spec.alternate
        || spec.grouping.is_some()
        || spec.align == Some(Align::AfterSign)
    {
        return None;
    }

    let body: String = match spec.precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    };
    let fill = spec.fill.unwrap_or(if spec.zero { '0' } else { ' ' });
    Some(pad(
        "",
        &body,
        fill,
        spec.align.unwrap_or(Align::Left),
        spec.width,
    ))
}

fn format_number(v: f64, spec: &FormatSpec) -> Option<String> {
    let negative = v.is_sign_negative() && !v.is_nan();
    let abs = v.abs();
    let upper = matches!(spec.kind, Some('F' | 'E' | 'G'));

    let mut body = match spec.kind {
        None => match spec.precision {
            Some(p) => {
                let g = general(abs, p, spec.alternate);
                if abs.is_finite() && !g.contains(['.', 'e']) {
                    format!("{g}.0")
                } else {
                    g
                }
            }
            None => plain_number(abs),
        },
        Some('f' | 'F') => fixed(abs, spec.precision.unwrap_or(6), spec.alternate),
        Some('e' | 'E') => scientific(abs, spec.precision.unwrap_or(6), spec.alternate),
        Some('g' | 'G' | 'n') => general(abs, spec.precision.unwrap_or(6), spec.alternate),
        Some('%') => {
            let pct = fixed(abs * 100.0, spec.precision.unwrap_or(6), spec.alternate);
            format!("{pct}%")
        }
        Some(_) => return None,
    };

    if let Some(sep) = spec.grouping {
        body = group_leading_digits(&body, sep);
    }
    if upper {
        body = body.to_uppercase();
    }

    let sign = match (negative, spec.sign) {
        (true, _) => "-",
        (false, Some(Sign::Plus)) => "+",
        (false, Some(Sign::Space)) => " ",
        (false, _) => "",
    };

    let (fill, align) = match (spec.fill, spec.align) {
        (fill, Some(align)) => (fill.unwrap_or(' '), align),
        (_, None) if spec.zero => ('0', Align::AfterSign),
        (_, None) => (' ', Align::Right),
    };
    Some(pad(sign, &body, fill, align, spec.width))
}

fn non_finite(abs: f64) -> Option<String> {
    if abs.is_nan() {
        Some("nan".to_string())
    } else if abs.is_infinite() {
        Some("inf".to_string())
    } else {
        None
    }
}

fn fixed(abs: f64, precision: usize, alternate: bool) -> String {
    if let Some(s) = non_finite(abs) {
        return s;
    }
    let s = format!("{abs:.precision$}");
    if alternate && precision == 0 {
        format!("{s}.")
    } else {
        s
    }
}

fn scientific(abs: f64, precision: usize, alternate: bool) -> String {
    if let Some(s) = non_finite(abs) {
        return s;
    }
    let s = exponent_form(&format!("{abs:.precision$e}"));
    if alternate && precision == 0 {
        s.replacen('e', ".e", 1)
    } else {
        s
    }
}

/// `g` formatting: `precision` significant digits, fixed-point unless the
/// exponent is below -4 or at least the precision; trailing zeros removed
/// unless `alternate`.
fn general(abs: f64, precision: usize, alternate: bool) -> String {
    if let Some(s) = non_finite(abs) {
        return s;
    }
    let p = precision.max(1);
    let sci = format!("{:.*e}", p - 1, abs);
    let exp: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    let out = if (-4..p as i32).contains(&exp) {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        format!("{abs:.decimals$}")
    } else {
        exponent_form(&sci)
    };

    if alternate {
        return out;
    }
    strip_trailing_zeros(&out)
}

fn strip_trailing_zeros(s: &str) -> String {
    let (mantissa, exponent) = match s.find('e') {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    if !mantissa.contains('.') {
        return s.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

fn group_leading_digits(body: &str, sep: char) -> String {
    let split = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (int_part, rest) = body.split_at(split);

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + rest.len());
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}

fn pad(sign: &str, body: &str, fill: char, align: Align, width: usize) -> String {
    let len = sign.chars().count() + body.chars().count();
    if len >= width {
        return format!("{sign}{body}");
    }
    let padding = width - len;
    let repeat = |n: usize| std::iter::repeat_n(fill, n).collect::<String>();
    match align {
        Align::Left => format!("{sign}{body}{}", repeat(padding)),
        Align::Right => format!("{}{sign}{body}", repeat(padding)),
        Align::Center => {
            let left = padding / 2;
            format!("{}{sign}{body}{}", repeat(left), repeat(padding - left))
        }
        Align::AfterSign => format!("{sign}{}{body}", repeat(padding)),
    }
}
