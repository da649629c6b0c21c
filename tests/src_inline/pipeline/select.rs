use super::*;

use std::fs;

use tempfile::tempdir;

use crate::input::filename::RunLabel;
use crate::model::matrix::{sermon_key_for, SermonRow};

fn matrix_with(metrics: &[&str], rows: Vec<(&str, &str, Vec<Option<f64>>)>) -> ScoreMatrix {
    let mut matrix = ScoreMatrix {
        metrics: metrics.iter().map(|m| m.to_string()).collect(),
        ..ScoreMatrix::default()
    };
    for (preacher, sermon_id, values) in rows {
        matrix.rows.push(SermonRow {
            sermon_key: sermon_key_for(preacher, sermon_id, RunLabel::A),
            preacher: preacher.to_string(),
            sermon_id: sermon_id.to_string(),
            run: RunLabel::A,
            n_frameworks: 1,
        });
        matrix.values.push(values);
    }
    matrix
}

fn corpus() -> ScoreMatrix {
    matrix_with(
        &["kolb.overall"],
        vec![
            ("ambrose", "01", vec![Some(9.0)]),
            ("augustine", "01", vec![Some(7.0)]),
            ("augustine", "02", vec![Some(8.0)]),
            ("chrysostom", "01", vec![Some(4.0)]),
            ("chrysostom", "02", vec![None]),
        ],
    )
}

#[test]
fn test_rank_by_sermon_count_with_name_tiebreak() {
    let ranking = rank_preachers(&corpus(), None, 1).unwrap();
    let order: Vec<&str> = ranking.iter().map(|e| e.preacher.as_str()).collect();
    // augustine and chrysostom both have two sermons; the name decides
    assert_eq!(order, vec!["augustine", "chrysostom", "ambrose"]);
    assert_eq!(ranking[0].sermons, 2);
    assert!(ranking[0].kept);
    assert!(!ranking[1].kept);
    assert!(ranking.iter().all(|e| e.mean.is_none()));
}

#[test]
fn test_rank_by_metric_mean() {
    let ranking = rank_preachers(&corpus(), Some("kolb.overall"), 2).unwrap();
    let order: Vec<&str> = ranking.iter().map(|e| e.preacher.as_str()).collect();
    assert_eq!(order, vec!["ambrose", "augustine", "chrysostom"]);
    assert_eq!(ranking[0].mean, Some(9.0));
    assert_eq!(ranking[1].mean, Some(7.5));
    // chrysostom's missing cell does not drag the mean down
    assert_eq!(ranking[2].mean, Some(4.0));
    assert!(ranking[0].kept && ranking[1].kept && !ranking[2].kept);
}

#[test]
fn test_unscored_preachers_rank_last() {
    let matrix = matrix_with(
        &["kolb.overall"],
        vec![
            ("ambrose", "01", vec![None]),
            ("ambrose", "02", vec![None]),
            ("augustine", "01", vec![Some(5.0)]),
        ],
    );
    let ranking = rank_preachers(&matrix, Some("kolb.overall"), 1).unwrap();
    assert_eq!(ranking[0].preacher, "augustine");
    assert_eq!(ranking[1].preacher, "ambrose");
    assert_eq!(ranking[1].mean, None);
}

#[test]
fn test_rank_means_are_rounded_after_sorting() {
    let matrix = matrix_with(
        &["kolb.overall"],
        vec![
            // both round to 7.0; rounding first would fall back to the
            // name tiebreak and put ambrose on top
            ("ambrose", "01", vec![Some(7.001)]),
            ("augustine", "01", vec![Some(7.004)]),
        ],
    );
    let ranking = rank_preachers(&matrix, Some("kolb.overall"), 1).unwrap();
    assert_eq!(ranking[0].preacher, "augustine");
    assert_eq!(ranking[0].mean, Some(7.0));
    assert_eq!(ranking[1].mean, Some(7.0));
}

#[test]
fn test_rank_unknown_metric_fails() {
    let err = rank_preachers(&corpus(), Some("nope.overall"), 1).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_run_select_end_to_end() {
    let dir = tempdir().unwrap();
    let table_path = dir.path().join("scores.tsv");
    let out_dir = dir.path().join("out");
    write_score_table(&corpus(), &table_path).unwrap();

    run_select(&SelectParams {
        table_path,
        out_dir: out_dir.clone(),
        top: 2,
        by: None,
    })
    .unwrap();

    let selected = fs::read_to_string(out_dir.join("selected.tsv")).unwrap();
    let lines: Vec<&str> = selected.lines().collect();
    // header plus the four rows of the two kept preachers
    assert_eq!(lines.len(), 5);
    assert!(lines[1..].iter().all(|l| !l.starts_with("ambrose")));

    let json = fs::read_to_string(out_dir.join("selection.json")).unwrap();
    assert!(json.contains("\"ranking\""));
    assert!(json.contains("\"top\": 2"));
}

#[test]
fn test_run_select_rejects_zero_top() {
    let dir = tempdir().unwrap();
    let err = run_select(&SelectParams {
        table_path: dir.path().join("scores.tsv"),
        out_dir: dir.path().join("out"),
        top: 0,
        by: None,
    })
    .unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}
