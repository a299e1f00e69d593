//! YAML value parsing
//!
//! Intrinsic tags are rewritten into single-key maps (`!Ref X` becomes
//! `{"!Ref": "X"}`). A half-typed key produces a missing-separator error on
//! nearly every keystroke, so those errors are recovered by dropping the
//! offending line and parsing again, a bounded number of times.

use super::intrinsics::is_intrinsic_tag;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

const MISSING_SEPARATOR: &str = "could not find expected ':'";

static SIMPLE_KEY_LINE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"while scanning a simple key at line (\d+)").ok());

/// Parse the first YAML document of `text`
///
/// Returns `None` when the text cannot be parsed, even after dropping up to
/// `max_recovery_attempts` lines.
pub fn parse_yaml(text: &str, max_recovery_attempts: usize) -> Option<Value> {
    let mut current: Cow<'_, str> = Cow::Borrowed(text);

    for attempt in 0..=max_recovery_attempts {
        let err = match load_first_document(&current) {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(dropped_lines = attempt, "recovered YAML value tree");
                }
                return Some(convert(value));
            }
            Err(err) => err,
        };

        if attempt == max_recovery_attempts {
            tracing::debug!(attempts = attempt, error = %err, "YAML recovery budget exhausted");
            return None;
        }

        let Some(line) = recoverable_line(&err) else {
            tracing::debug!(error = %err, "YAML value parse failed");
            return None;
        };
        let Some(next) = remove_line(&current, line) else {
            tracing::debug!(line, "YAML error points outside the document");
            return None;
        };
        tracing::debug!(line, attempt = attempt + 1, "dropping line after missing separator");
        current = Cow::Owned(next);
    }
    None
}

fn load_first_document(text: &str) -> Result<serde_yaml::Value, serde_yaml::Error> {
    match serde_yaml::Deserializer::from_str(text).next() {
        Some(document) => serde_yaml::Value::deserialize(document),
        None => Ok(serde_yaml::Value::Null),
    }
}

/// One-based line to drop, for missing-separator errors only
fn recoverable_line(err: &serde_yaml::Error) -> Option<usize> {
    let message = err.to_string();
    if !message.contains(MISSING_SEPARATOR) {
        return None;
    }

    let key_line = SIMPLE_KEY_LINE
        .as_ref()
        .and_then(|re| re.captures(&message))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok());

    key_line.or_else(|| err.location().map(|location| location.line()))
}

fn remove_line(text: &str, line: usize) -> Option<String> {
    let index = line.checked_sub(1)?;
    let lines: Vec<&str> = text.split('\n').collect();
    if index >= lines.len() {
        return None;
    }
    let kept: Vec<&str> = lines
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, l)| l)
        .collect();
    Some(kept.join("\n"))
}

fn convert(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => convert_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(items.into_iter().map(convert).collect()),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_string(&key), convert(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let name = tag.strip_prefix('!').unwrap_or(&tag);
            let data = convert(tagged.value);
            if is_intrinsic_tag(name) {
                let mut map = Map::with_capacity(1);
                map.insert(format!("!{}", name), data);
                Value::Object(map)
            } else {
                data
            }
        }
    }
}

fn convert_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            // .nan / .inf have no JSON number
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

fn key_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => key_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
