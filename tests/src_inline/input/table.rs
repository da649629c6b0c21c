use super::*;

use std::fs;

use tempfile::tempdir;

use crate::input::filename::RunLabel;
use crate::input::InputError;

const TABLE: &str = "\
sermon_key\tpreacher\tsermon_id\trun\tn_frameworks\tkolb.overall\tnarrative.overall
augustine_01\taugustine\t01\tA\t9\t7.250000\t6.000000
augustine_01_B\taugustine\t01\tB\t9\t7.000000\t
luther_02\tluther\t02\tA\t8\t\t5.500000
";

#[test]
fn test_reads_rows_metrics_and_missing_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.tsv");
    fs::write(&path, TABLE).unwrap();

    let matrix = read_score_table(&path).unwrap();
    assert_eq!(matrix.metrics, vec!["kolb.overall", "narrative.overall"]);
    assert_eq!(matrix.n_rows(), 3);

    assert_eq!(matrix.rows[0].sermon_key, "augustine_01");
    assert_eq!(matrix.rows[0].run, RunLabel::A);
    assert_eq!(matrix.rows[0].n_frameworks, 9);
    assert_eq!(matrix.rows[1].run, RunLabel::B);

    assert_eq!(matrix.values[0], vec![Some(7.25), Some(6.0)]);
    assert_eq!(matrix.values[1], vec![Some(7.0), None]);
    assert_eq!(matrix.values[2], vec![None, Some(5.5)]);
}

#[test]
fn test_missing_table_is_missing_input() {
    let dir = tempdir().unwrap();
    let err = read_score_table(&dir.path().join("absent.tsv")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_wrong_header_is_invalid_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.tsv");
    fs::write(&path, "preacher\tsermon\tkolb.overall\na\t01\t7.0\n").unwrap();
    let err = read_score_table(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_bad_run_label_and_bad_value_are_parse_errors() {
    let dir = tempdir().unwrap();

    let path = dir.path().join("bad_run.tsv");
    fs::write(
        &path,
        "sermon_key\tpreacher\tsermon_id\trun\tn_frameworks\tkolb.overall\na_01\ta\t01\tX\t9\t7.0\n",
    )
    .unwrap();
    let err = read_score_table(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));

    let path = dir.path().join("bad_value.tsv");
    fs::write(
        &path,
        "sermon_key\tpreacher\tsermon_id\trun\tn_frameworks\tkolb.overall\na_01\ta\t01\tA\t9\tseven\n",
    )
    .unwrap();
    let err = read_score_table(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_field_count_mismatch_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.tsv");
    fs::write(
        &path,
        "sermon_key\tpreacher\tsermon_id\trun\tn_frameworks\tkolb.overall\na_01\ta\t01\tA\t9\n",
    )
    .unwrap();
    let err = read_score_table(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_round_trips_written_score_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.tsv");
    fs::write(&path, TABLE).unwrap();
    let matrix = read_score_table(&path).unwrap();

    let copy_path = dir.path().join("copy.tsv");
    crate::report::write_score_table(&matrix, &copy_path).unwrap();
    assert_eq!(fs::read_to_string(&copy_path).unwrap(), TABLE);
}
