use super::*;

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use crate::input::corpus::{LoadedAnalysis, ReadIssue};
use crate::input::filename::parse_analysis_filename;

fn analysis(file_name: &str, data: Value) -> LoadedAnalysis {
    LoadedAnalysis {
        name: parse_analysis_filename(file_name).expect("fixture file name must parse"),
        file_name: file_name.to_string(),
        data,
    }
}

fn scan_with(analyses: Vec<LoadedAnalysis>) -> CorpusScan {
    CorpusScan {
        n_files: analyses.len(),
        analyses,
        ..CorpusScan::default()
    }
}

fn complete_kolb() -> Value {
    json!({
        "kolb_phases_analysis": {
            "phase_1_concrete_experience": {"score": 6.0},
            "phase_2_reflective_observation": {"score": 7.0},
            "phase_3_abstract_conceptualization": {"score": 5.5},
            "phase_4_active_experimentation": {"score": 0.0}
        },
        "overall_picture": {"overall_kolb_score": 6.1}
    })
}

#[test]
fn test_absent_frameworks_reported_as_missing_files() {
    let scan = scan_with(vec![analysis("augustine_01_kolb.json", complete_kolb())]);
    let issues = collect_issues(&scan);

    // one sermon, eight of the nine frameworks have no file
    assert_eq!(issues.len(), 8);
    assert!(issues.iter().all(|i| i.kind == IssueKind::MissingFile));
    assert!(issues.iter().all(|i| i.framework != "kolb"));
    assert!(issues.iter().any(|i| i.framework == "aristoteles"));
    assert_eq!(issues[0].preacher, "augustine");
    assert_eq!(issues[0].sermon_id, "01");
}

#[test]
fn test_zero_score_is_not_a_missing_field() {
    // phase_4 carries an explicit 0.0
    let scan = scan_with(vec![analysis("augustine_01_kolb.json", complete_kolb())]);
    let issues = collect_issues(&scan);
    assert!(!issues
        .iter()
        .any(|i| i.framework == "kolb" && i.kind == IssueKind::MissingField));
}

#[test]
fn test_empty_string_critical_field_is_flagged() {
    let data = json!({
        "aristotelian_modes_analysis": {
            "logos": {"score": ""},
            "pathos": {"score": 6.0},
            "ethos": {"score": 8.0}
        },
        "overall_picture": {"overall_rhetorical_score": 7.0}
    });
    let scan = scan_with(vec![analysis("augustine_01_aristoteles.json", data)]);
    let issues = collect_issues(&scan);

    let fields: Vec<&CaseIssue> = issues
        .iter()
        .filter(|i| i.kind == IssueKind::MissingField)
        .collect();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].framework, "aristoteles");
    assert_eq!(fields[0].field, "logos.score");
    assert!(fields[0].detail.contains("aristotelian_modes_analysis.logos.score"));
}

#[test]
fn test_unreadable_file_becomes_read_error_issue() {
    let mut scan = scan_with(vec![]);
    scan.read_errors.push(ReadIssue {
        name: parse_analysis_filename("augustine_01_aristoteles.json.gz").unwrap(),
        file_name: "augustine_01_aristoteles.json.gz".to_string(),
        detail: "corrupt deflate stream".to_string(),
    });
    let issues = collect_issues(&scan);

    let read_errors: Vec<&CaseIssue> = issues
        .iter()
        .filter(|i| i.kind == IssueKind::ReadError)
        .collect();
    assert_eq!(read_errors.len(), 1);
    assert_eq!(read_errors[0].framework, "aristoteles");
    assert_eq!(read_errors[0].detail, "corrupt deflate stream");
    // the other eight frameworks are still missing outright
    assert_eq!(issues.len(), 9);
}

#[test]
fn test_dekker_needs_at_least_one_scored_criterion() {
    let empty = json!({
        "analysis_per_criterion": {},
        "overall_dekker_analysis": {"average_score": 6.0}
    });
    let scan = scan_with(vec![analysis("augustine_01_dekker.json", empty)]);
    let issues = collect_issues(&scan);
    let dekker: Vec<&CaseIssue> = issues.iter().filter(|i| i.framework == "dekker").collect();
    assert_eq!(dekker.len(), 1);
    assert_eq!(dekker[0].kind, IssueKind::MissingField);
    assert_eq!(dekker[0].field, "criterion scores");

    let scored = json!({
        "analysis_per_criterion": {
            "criterion_1_specific_bible_passage": {"score_1_to_10": 7}
        }
    });
    let scan = scan_with(vec![analysis("augustine_01_dekker.json", scored)]);
    let issues = collect_issues(&scan);
    assert!(!issues.iter().any(|i| i.framework == "dekker"));
}

#[test]
fn test_dekker_empty_string_criterion_score_does_not_count() {
    let data = json!({
        "analysis_per_criterion": {
            "criterion_1_specific_bible_passage": {"score_1_to_10": ""}
        }
    });
    let scan = scan_with(vec![analysis("augustine_01_dekker.json", data)]);
    let issues = collect_issues(&scan);
    assert!(issues
        .iter()
        .any(|i| i.framework == "dekker" && i.field == "criterion scores"));
}

#[test]
fn test_replicate_runs_are_checked_separately() {
    let scan = scan_with(vec![
        analysis("augustine_01_kolb.json", complete_kolb()),
        analysis("augustine_01_B_kolb.json", complete_kolb()),
    ]);
    let issues = collect_issues(&scan);
    // eight missing frameworks for each of the two cases
    assert_eq!(issues.len(), 16);
    assert!(issues.iter().any(|i| i.sermon_id == "01"));
    assert!(issues.iter().any(|i| i.sermon_id == "01_B"));
}

#[test]
fn test_run_check_end_to_end() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("analyses");
    let out_dir = dir.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(
        input_dir.join("augustine_01_kolb.json"),
        serde_json::to_vec(&complete_kolb()).unwrap(),
    )
    .unwrap();

    let count = run_check(&CheckParams {
        input_dir,
        out_dir: out_dir.clone(),
    })
    .unwrap();
    assert_eq!(count, 8);

    let table = fs::read_to_string(out_dir.join("incomplete_cases.tsv")).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "preacher\tsermon_id\tframework\tissue\tfield\tdetail");
    assert_eq!(lines.len(), 9);
    assert!(lines[1..].iter().all(|line| line.contains("missing_file")));
}

#[test]
fn test_run_check_fails_on_empty_directory() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("analyses");
    fs::create_dir_all(&input_dir).unwrap();

    let err = run_check(&CheckParams {
        input_dir,
        out_dir: dir.path().join("out"),
    })
    .unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}
