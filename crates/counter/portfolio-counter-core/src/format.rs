//! Rendering of intermediate counter values.
//!
//! Output matches what the browser prints for the same number, including
//! `toFixed` tie-breaking and the spelling of `NaN` and infinities.

use crate::target::FormatTag;

/// Text for `current` under the given display style.
pub fn render(format: FormatTag, current: f64) -> String {
    match format {
        FormatTag::Thousands => format!("{}K", to_fixed_1(current / 1000.0)),
        FormatTag::PlusSuffix => format!("{}+", floor_string(current)),
        FormatTag::Plain => floor_string(current),
    }
}

fn non_finite(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("NaN".to_string())
    } else if x.is_infinite() {
        Some(if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}

/// `Number.prototype.toFixed(1)`.
pub fn to_fixed_1(x: f64) -> String {
    if let Some(s) = non_finite(x) {
        return s;
    }
    if x == 0.0 {
        return "0.0".to_string();
    }
    if x < 0.0 {
        return format!("-{}", to_fixed_1(-x));
    }
    // Exact ties at one decimal are odd multiples of 0.25; the browser rounds
    // those up where Rust formatting rounds half to even.
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (x * 10.0).ceil();
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{x:.1}")
}

/// `String(Math.floor(x))`.
pub fn floor_string(x: f64) -> String {
    if let Some(s) = non_finite(x) {
        return s;
    }
    let floored = x.floor();
    if floored == 0.0 {
        // covers -0
        return "0".to_string();
    }
    format!("{floored:.0}")
}
