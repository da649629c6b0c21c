use super::*;

use serde_json::json;

use crate::frameworks::extract::{dekker_criterion_name, esthetiek_criterion_name};

#[test]
fn test_composite_columns_cover_all_frameworks() {
    let columns = composite_columns();
    assert_eq!(columns.len(), frameworks().len());
    assert!(columns.contains(&"aristoteles.overall".to_string()));
    assert!(columns.contains(&"speech_act.overall".to_string()));
    assert!(columns.iter().all(|c| c.ends_with(".overall")));
}

#[test]
fn test_metric_scope_fixed_and_dynamic_columns() {
    assert_eq!(metric_scope("kolb.overall"), MetricScope::Both);
    assert_eq!(metric_scope("kolb.concrete_experience"), MetricScope::Both);
    assert_eq!(metric_scope("kolb.dreamer"), MetricScope::DetailedOnly);
    assert_eq!(metric_scope("aristoteles.balance"), MetricScope::DetailedOnly);
    assert_eq!(metric_scope("esthetiek.poetics"), MetricScope::SummaryOnly);
    // dynamic criterion columns
    assert_eq!(metric_scope("esthetiek.poetics_imagery"), MetricScope::DetailedOnly);
    assert_eq!(metric_scope("dekker.1_specific_bible_passage"), MetricScope::Both);
    // unknown shapes default to both scopes
    assert_eq!(metric_scope("n_frameworks"), MetricScope::Both);
    assert_eq!(metric_scope("unknown.column"), MetricScope::Both);
}

#[test]
fn test_in_scope_summary_vs_detailed() {
    assert!(in_scope("kolb.overall", false));
    assert!(in_scope("kolb.overall", true));
    assert!(in_scope("esthetiek.poetics", false));
    assert!(!in_scope("esthetiek.poetics", true));
    assert!(!in_scope("kolb.dreamer", false));
    assert!(in_scope("kolb.dreamer", true));
}

#[test]
fn test_extract_metrics_kolb_fixture() {
    let kolb = find_framework("kolb").unwrap();
    let data = json!({
        "kolb_phases_analysis": {
            "phase_1_concrete_experience": {"score": 7.0},
            "phase_2_reflective_observation": {"score": 0.0},
            "phase_3_abstract_conceptualization": {"score": 12.0},
            "phase_4_active_experimentation": {"score": "strong"}
        },
        "learning_styles_analysis": {
            "dreamer": {"score": 6.5},
            "assimilating_style": {"score": 5.0}
        },
        "overall_picture": {"overall_kolb_score": 6.8}
    });
    let metrics = extract_metrics(kolb, &data);
    let get = |name: &str| {
        metrics
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    };

    assert_eq!(get("kolb.concrete_experience"), Some(7.0));
    // zero is a valid score
    assert_eq!(get("kolb.reflective_observation"), Some(0.0));
    // out-of-range and non-numeric scores are dropped
    assert_eq!(get("kolb.abstract_conceptualization"), None);
    assert_eq!(get("kolb.active_experimentation"), None);
    // both learning style key sets are read
    assert_eq!(get("kolb.dreamer"), Some(6.5));
    assert_eq!(get("kolb.assimilating"), Some(5.0));
    assert_eq!(get("kolb.overall"), Some(6.8));
}

#[test]
fn test_extract_metrics_dekker_criteria_are_normalized() {
    let dekker = find_framework("dekker").unwrap();
    let data = json!({
        "analysis_per_criterion": {
            "criterion_1_specific_bible_passage": {"score_1_to_10": 8},
            "criterion_2_concrete_concrete": {"score_1_to_10": 0.0},
            "criterion_3_christ": {"score_1_to_10": 11.0},
            "notes": "free text"
        },
        "overall_dekker_analysis": {"average_score": 7.5}
    });
    let metrics = extract_metrics(dekker, &data);
    let names: Vec<&str> = metrics.iter().map(|(n, _)| n.as_str()).collect();

    assert!(names.contains(&"dekker.1_specific_bible_passage"));
    assert!(names.contains(&"dekker.2_concrete"));
    // out-of-range criterion scores are dropped
    assert!(!names.contains(&"dekker.3_christ"));
    assert!(names.contains(&"dekker.overall"));
}

#[test]
fn test_extract_metrics_esthetiek_domains() {
    let esthetiek = find_framework("esthetiek").unwrap();
    let data = json!({
        "domain_a_poetics_of_language": {
            "average_score_language": 7.2,
            "criterion_a1_imagery": {"score": 8.0},
            "criterion_a2_rhythm": {"score": 6.0}
        },
        "domain_b_dramaturgy_of_structure": {
            "average_score_structure": 6.9,
            "criterion_b1_tension_arc": {"score": 7.0},
            "opening": {"score": 5.5}
        },
        "kitsch_diagnosis": {"anti_kitsch_score": 8.5},
        "overall_aesthetics": {"overall_aesthetic_score": 7.1}
    });
    let metrics = extract_metrics(esthetiek, &data);
    let get = |name: &str| {
        metrics
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    };

    assert_eq!(get("esthetiek.poetics"), Some(7.2));
    assert_eq!(get("esthetiek.dramaturgy"), Some(6.9));
    assert_eq!(get("esthetiek.poetics_imagery"), Some(8.0));
    assert_eq!(get("esthetiek.poetics_rhythm"), Some(6.0));
    assert_eq!(get("esthetiek.dramaturgy_tension_arc"), Some(7.0));
    // entries without the ordinal prefix keep their whole key
    assert_eq!(get("esthetiek.dramaturgy_opening"), Some(5.5));
    assert_eq!(get("esthetiek.anti_kitsch"), Some(8.5));
    assert_eq!(get("esthetiek.overall"), Some(7.1));
}

#[test]
fn test_criterion_name_normalization() {
    assert_eq!(dekker_criterion_name("criterion_2_concrete_concrete"), "2_concrete");
    assert_eq!(dekker_criterion_name("plain_key"), "plain_key");
    assert_eq!(dekker_criterion_name("criterion_5_CHRIST"), "5_christ");

    assert_eq!(esthetiek_criterion_name("criterion_a3_imagery", 'a'), "imagery");
    assert_eq!(esthetiek_criterion_name("criterion_b12_tension_arc", 'b'), "tension_arc");
    // wrong domain letter or missing ordinal leaves the key untouched
    assert_eq!(esthetiek_criterion_name("criterion_b1_arc", 'a'), "criterion_b1_arc");
    assert_eq!(esthetiek_criterion_name("criterion_final", 'a'), "criterion_final");
    assert_eq!(esthetiek_criterion_name("opening", 'b'), "opening");
}

#[test]
fn test_find_framework() {
    assert_eq!(find_framework("schulz_von_thun").unwrap().group, "communication");
    assert!(find_framework("unknown").is_none());
}
