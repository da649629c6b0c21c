use serde_json::Value;

use crate::frameworks::defs::FrameworkDef;
use crate::input::json::{score_at, valid_score, value_at};

pub fn extract_metrics(fw: &FrameworkDef, data: &Value) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for metric in fw.metrics {
        if let Some(score) = score_at(data, metric.path) {
            out.push((format!("{}.{}", fw.id, metric.name), score));
        }
    }
    match fw.id {
        "dekker" => extract_dekker_criteria(data, &mut out),
        "esthetiek" => extract_esthetiek_criteria(data, &mut out),
        _ => {}
    }
    if let Some(score) = score_at(data, fw.composite_path) {
        out.push((composite_metric(fw), score));
    }
    out
}

fn composite_metric(fw: &FrameworkDef) -> String {
    format!("{}.overall", fw.id)
}

fn extract_dekker_criteria(data: &Value, out: &mut Vec<(String, f64)>) {
    let Some(criteria) = value_at(data, "analysis_per_criterion").and_then(Value::as_object) else {
        return;
    };
    for (key, entry) in criteria {
        let Some(score) = entry.get("score_1_to_10").and_then(valid_score) else {
            continue;
        };
        out.push((format!("dekker.{}", dekker_criterion_name(key)), score));
    }
}

pub fn dekker_criterion_name(key: &str) -> String {
    let stripped = key.strip_prefix("criterion_").unwrap_or(key);
    stripped
        .replace("concrete_concrete", "concrete")
        .to_ascii_lowercase()
}

fn extract_esthetiek_criteria(data: &Value, out: &mut Vec<(String, f64)>) {
    for (domain_path, domain, letter) in [
        ("domain_a_poetics_of_language", "poetics", 'a'),
        ("domain_b_dramaturgy_of_structure", "dramaturgy", 'b'),
    ] {
        let Some(entries) = value_at(data, domain_path).and_then(Value::as_object) else {
            continue;
        };
        for (key, entry) in entries {
            if !entry.is_object() {
                continue;
            }
            let Some(score) = entry.get("score").and_then(valid_score) else {
                continue;
            };
            let name = esthetiek_criterion_name(key, letter);
            out.push((format!("esthetiek.{}_{}", domain, name.to_ascii_lowercase()), score));
        }
    }
}

// criterion_a3_imagery -> imagery; keys without the ordinal prefix are kept whole.
pub fn esthetiek_criterion_name(key: &str, domain_letter: char) -> &str {
    if let Some(rest) = key.strip_prefix("criterion_") {
        if let Some(tail) = rest.strip_prefix(domain_letter) {
            let digits = tail.chars().take_while(char::is_ascii_digit).count();
            if digits > 0 {
                if let Some(name) = tail[digits..].strip_prefix('_') {
                    if !name.is_empty() {
                        return name;
                    }
                }
            }
        }
    }
    key
}
