//! Number formatting for prompt text and JSON output.

use serde::Serializer;

/// Largest magnitude below which every whole f64 is an exact integer (2^53).
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Serialize an amount as a JSON integer when it has no fractional part, so
/// `80000.0` is written as `80000`.
pub fn serialize_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn serialize_optional_amount<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(amount) => serialize_amount(amount, serializer),
        None => serializer.serialize_none(),
    }
}

/// Render a number the way an en-US locale does: comma thousands separators,
/// at most three fraction digits, trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value.is_sign_negative() && !fixed.trim_matches(|c| c == '0' || c == '.').is_empty() {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
