//! Target strings: the literal text a counter lands on, plus the numeric
//! magnitude and display style derived from it.
//!
//! Parsing deliberately mirrors the loose number coercion of the page script:
//! the longest numeric prefix wins and anything after it is ignored, so
//! `"120+"` is 120 and `"2.5K"` is 2.5 thousand. Garbage yields `NaN`.

/// How intermediate values are rendered while a counter climbs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FormatTag {
    /// `"2.5K"`: one decimal of thousands followed by `K`.
    Thousands,
    /// `"120+"`: whole number followed by `+`.
    PlusSuffix,
    /// `"42"`: whole number.
    Plain,
}

/// Parsed target, immutable for the lifetime of one animation.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetSpec {
    /// Exact text shown when the animation completes.
    pub raw_text: String,
    pub magnitude: f64,
    pub format: FormatTag,
}

impl TargetSpec {
    /// First match wins: `K` anywhere, then `+` anywhere, then plain.
    pub fn parse(raw: &str) -> Self {
        let (magnitude, format) = if raw.contains('K') {
            (parse_float(raw) * 1000.0, FormatTag::Thousands)
        } else if raw.contains('+') {
            (parse_int(raw), FormatTag::PlusSuffix)
        } else {
            (parse_int(raw), FormatTag::Plain)
        };
        Self {
            raw_text: raw.to_string(),
            magnitude,
            format,
        }
    }

    /// False for `NaN` magnitudes, which never satisfy the completion check.
    /// Infinite magnitudes are numbers and do complete.
    pub fn is_number(&self) -> bool {
        !self.magnitude.is_nan()
    }
}

/// ECMAScript `WhiteSpace` and `LineTerminator`. Unlike `char::is_whitespace`
/// this excludes U+0085 (NEL).
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{B}' | '\u{C}' | ' ' | '\u{A0}' | '\u{FEFF}'
            | '\n' | '\r' | '\u{2028}' | '\u{2029}'
            // remaining Zs
            | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

fn split_sign(s: &str) -> (f64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, s)
    }
}

fn leading_digits(s: &str, radix: u32) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}

/// ECMAScript `parseFloat`: longest decimal literal prefix, `NaN` if none.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start_matches(is_js_whitespace);
    let (sign, body) = split_sign(s);

    if body.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let int_part = leading_digits(body, 10);
    let mut rest = &body[int_part.len()..];
    let mut frac_part = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        frac_part = leading_digits(after_dot, 10);
        rest = &after_dot[frac_part.len()..];
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return f64::NAN;
    }

    // The exponent only counts when at least one digit follows it.
    let mut exp_part = String::new();
    if let Some(after_e) = rest.strip_prefix(['e', 'E']) {
        let (exp_sign, exp_body) = match after_e.as_bytes().first() {
            Some(b'-') => ("-", &after_e[1..]),
            Some(b'+') => ("", &after_e[1..]),
            _ => ("", after_e),
        };
        let exp_digits = leading_digits(exp_body, 10);
        if !exp_digits.is_empty() {
            exp_part = format!("e{exp_sign}{exp_digits}");
        }
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    let literal = format!("{int_part}.{frac_part}{exp_part}");
    literal
        .parse::<f64>()
        .map(|v| sign * v)
        .unwrap_or(f64::NAN)
}

/// ECMAScript `parseInt` without an explicit radix: decimal digits, or hex
/// after a `0x` prefix. Stops at the first non-digit, `NaN` if none.
pub fn parse_int(input: &str) -> f64 {
    let s = input.trim_start_matches(is_js_whitespace);
    let (sign, body) = split_sign(s);

    let hex_body = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"));
    if let Some(hex) = hex_body {
        let digits = leading_digits(hex, 16);
        if digits.is_empty() {
            return f64::NAN;
        }
        let value = digits
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0.0_f64, |acc, d| acc * 16.0 + f64::from(d));
        return sign * value;
    }

    let digits = leading_digits(body, 10);
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .parse::<f64>()
        .map(|v| sign * v)
        .unwrap_or(f64::NAN)
}
