//! Text normalization shared by the raw-sheet builder and the memo parsers.

use serde_json::Value;

/// Trim outer whitespace and unify line terminators to `\n`.
pub fn normalize(text: &str) -> String {
    text.trim().replace("\r\n", "\n").replace('\r', "\n")
}

/// Coerce a loosely-typed raw value into normalized display text.
///
/// Strings are normalized, numbers keep their decimal form and `true` becomes
/// `"true"`. Everything else (null, `false`, arrays, objects, absent) is `""`.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => normalize(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// JSON truthiness: non-empty strings, non-zero numbers, `true`, and any array
/// or object count as set.
pub fn value_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Collapse a multi-line value onto a single line.
pub fn strip_newlines(text: &str) -> String {
    text.replace("\r\n", "").replace(['\r', '\n'], "")
}
