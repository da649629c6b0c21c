use super::*;

use std::fs;

use tempfile::tempdir;

use crate::input::filename::RunLabel;
use crate::model::matrix::{sermon_key_for, SermonRow};
use crate::report::write_score_table;

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

#[test]
fn test_violin_series_sorts_and_summarizes() {
    let series = violin_series(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
    assert_eq!(series.values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(series.count, 5);
    assert_eq!(
        series.summary,
        ViolinSummary {
            min: 1.0,
            max: 5.0,
            median: 3.0,
            q1: 1.5,
            q3: 4.5,
            mean: 3.0,
        }
    );
}

#[test]
fn test_violin_series_small_samples_use_index_quartiles() {
    let two = violin_series(&[8.0, 4.0]).unwrap();
    assert_eq!(two.summary.q1, 4.0);
    assert_eq!(two.summary.q3, 8.0);
    assert_eq!(two.summary.median, 6.0);

    let three = violin_series(&[9.0, 3.0, 6.0]).unwrap();
    assert_eq!(three.summary.q1, 3.0);
    assert_eq!(three.summary.q3, 9.0);

    let one = violin_series(&[7.5]).unwrap();
    assert_eq!(one.summary.q1, 7.5);
    assert_eq!(one.summary.q3, 7.5);
    assert_eq!(one.values, vec![7.5]);

    assert_eq!(violin_series(&[]), None);
}

#[test]
fn test_violin_series_rounds_to_two_decimals() {
    let series = violin_series(&[2.346]).unwrap();
    assert_eq!(series.values, vec![2.35]);
    assert_eq!(series.summary.mean, 2.35);
    assert_eq!(series.summary.median, 2.35);
}

#[test]
fn test_compute_violin_series_groups_by_preacher() {
    let matrix = matrix_with(
        &["esthetiek.poetics", "kolb.overall"],
        vec![
            ("augustine", "01", vec![Some(6.0), Some(1.0)]),
            ("augustine", "02", vec![None, Some(2.0)]),
            ("chrysostom", "01", vec![None, None]),
        ],
    );
    let metrics = compute_violin_series(&matrix, false);

    let kolb = &metrics["kolb.overall"];
    assert_eq!(kolb["augustine"].values, vec![1.0, 2.0]);
    assert!(!kolb.contains_key("chrysostom"));

    // detailed scope drops the summary-only aesthetics domain
    assert!(metrics.contains_key("esthetiek.poetics"));
    assert!(!compute_violin_series(&matrix, true).contains_key("esthetiek.poetics"));
}

#[test]
fn test_run_violin_end_to_end() {
    let dir = tempdir().unwrap();
    let table_path = dir.path().join("scores.tsv");
    let out_dir = dir.path().join("out");
    let matrix = matrix_with(
        &["kolb.overall"],
        vec![
            ("augustine", "01", vec![Some(7.0)]),
            ("augustine", "02", vec![Some(8.0)]),
            ("chrysostom", "01", vec![Some(5.0)]),
        ],
    );
    write_score_table(&matrix, &table_path).unwrap();

    run_violin(&ViolinParams {
        table_path,
        out_dir: out_dir.clone(),
        detailed: false,
    })
    .unwrap();

    let json = fs::read_to_string(out_dir.join("violin_data.json")).unwrap();
    assert!(json.contains("\"scope\": \"summary\""));
    assert!(json.contains("\"sermon_counts\""));
    assert!(json.contains("\"augustine\": 2"));
    assert!(json.contains("\"kolb.overall\""));
}
