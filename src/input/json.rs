use std::path::Path;

use serde_json::Value;

use crate::input::{InputError, open_maybe_gz};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

pub fn load_analysis_json(path: &Path) -> Result<Option<Value>, InputError> {
    let reader = open_maybe_gz(path)?;
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))?;
    Ok(unwrap_payload(value))
}

// Some scorer runs wrap the analysis object in a one-element array.
pub fn unwrap_payload(value: Value) -> Option<Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(mut items) if items.len() == 1 => match items.pop() {
            Some(inner @ Value::Object(_)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

pub fn value_at<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

pub fn valid_score(value: &Value) -> Option<f64> {
    let num = value.as_f64()?;
    if (SCORE_MIN..=SCORE_MAX).contains(&num) {
        Some(num)
    } else {
        None
    }
}

pub fn score_at(data: &Value, path: &str) -> Option<f64> {
    valid_score(value_at(data, path)?)
}
