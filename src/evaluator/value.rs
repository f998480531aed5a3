//! Answer value handling: rich-wrapper unwrapping, string normalization and
//! numeric coercion shared by the rule engine.

use serde_json::Value;

/// Unwraps a rich response wrapper (`{"answer": ...}`) to the raw answer.
/// Any other shape passes through untouched.
pub(super) fn unwrap_rich(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("answer").unwrap_or(value),
        _ => value,
    }
}

/// Renders a scalar the way answers are compared: null becomes the empty
/// string, numbers drop a trailing `.0`, arrays join their elements.
pub(super) fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Comparison normalization: lowercase, straighten smart quotes, trim.
pub(super) fn normalize(s: &str) -> String {
    s.to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
        .trim()
        .to_string()
}

/// Label normalization: like [`normalize`] but also collapses interior
/// whitespace runs, since labels get reformatted by the editor.
pub(super) fn normalize_label(s: &str) -> String {
    normalize(s).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Numeric coercion for comparison operators: numbers pass through, numeric
/// strings parse, everything else (including empty strings) has no numeric
/// interpretation and fails the comparison.
pub(super) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub(super) fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse().ok()
}

/// An answer counts as empty when it is null or the empty string. Empty
/// arrays are deliberately *set*: the respondent reached the question.
pub(super) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
