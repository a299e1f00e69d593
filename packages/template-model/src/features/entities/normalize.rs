//! Implicit scalar typing for values that arrive as strings
//!
//! `"true"`/`"false"` become booleans, full numerals become numbers and
//! `"null"`/`"~"` become null. The check runs on the trimmed string; a
//! string that does not match keeps its original text, whitespace included.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

static NUMERAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d+)?|\.\d+)$").ok());

/// Normalize every string scalar in `value`, recursively
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::String(s) => normalize_scalar(s),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize_value(value)))
                .collect(),
        ),
        other => other,
    }
}

fn normalize_scalar(s: String) -> Value {
    let trimmed = s.trim();
    match trimmed {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" | "~" => Value::Null,
        _ => match parse_numeral(trimmed) {
            Some(number) => Value::Number(number),
            None => Value::String(s),
        },
    }
}

fn parse_numeral(text: &str) -> Option<Number> {
    let is_numeral = NUMERAL.as_ref().map_or(false, |re| re.is_match(text));
    if !is_numeral {
        return None;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::from(i));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}
