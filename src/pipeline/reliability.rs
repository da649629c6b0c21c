use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::input::filename::RunLabel;
use crate::input::table::read_score_table;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;
use crate::report::text::{render_reliability_text, ReliabilityReportRow};
use crate::report::{
    ensure_out_dir, format_f64_6, format_opt_f64_6, tool_version, write_json, write_text, TOOL_NAME,
};
use crate::stats::describe::{mean, sample_variance};
use crate::stats::icc::{anova_two_way, icc_agreement, icc_consistency, icc_oneway};
use crate::stats::pearson::pearson_summary;

#[derive(Debug, Clone)]
pub struct ReliabilityParams {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub min_pairs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReliability {
    pub metric: String,
    pub n_pairs: usize,
    pub mean_a: f64,
    pub mean_b: f64,
    pub mean_diff: f64,
    pub r: Option<f64>,
    pub r_ci_low: Option<f64>,
    pub r_ci_high: Option<f64>,
    pub p_value: Option<f64>,
    pub icc_a1: Option<f64>,
    pub icc_a1_ci_low: Option<f64>,
    pub icc_a1_ci_high: Option<f64>,
    pub icc_c1: Option<f64>,
    pub icc_c1_ci_low: Option<f64>,
    pub icc_c1_ci_high: Option<f64>,
    pub icc_1: Option<f64>,
}

#[derive(Serialize)]
struct ReliabilityArtifact {
    tool: &'static str,
    version: &'static str,
    min_pairs: usize,
    n_pairs: usize,
    n_unpaired: usize,
    metrics: Vec<MetricReliability>,
}

pub fn run_reliability(params: &ReliabilityParams) -> Result<(), InputError> {
    let matrix = read_score_table(&params.table_path)?;
    let (pairs, n_unpaired) = pair_runs(&matrix);
    if pairs.is_empty() {
        return Err(InputError::InvalidInput(
            "score table has no sermons with both an A and a B run".to_string(),
        ));
    }
    let min_pairs = params.min_pairs.max(2);
    let rows = compute_reliability(&matrix, &pairs, min_pairs);
    if rows.is_empty() {
        warn!("no metric reaches {min_pairs} scored pairs");
    }

    ensure_out_dir(&params.out_dir)?;
    let table_path = params.out_dir.join("reliability.tsv");
    write_reliability_table(&rows, &table_path)?;
    let artifact = ReliabilityArtifact {
        tool: TOOL_NAME,
        version: tool_version(),
        min_pairs,
        n_pairs: pairs.len(),
        n_unpaired,
        metrics: rows.clone(),
    };
    write_json(&params.out_dir.join("reliability.json"), &artifact)?;

    let report_rows: Vec<ReliabilityReportRow> = rows
        .iter()
        .map(|row| ReliabilityReportRow {
            metric: row.metric.clone(),
            n_pairs: row.n_pairs,
            r: row.r,
            icc_a1: row.icc_a1,
            icc_c1: row.icc_c1,
            mean_diff: row.mean_diff,
        })
        .collect();
    let report = render_reliability_text(min_pairs, &report_rows);
    write_text(&params.out_dir.join("reliability_report.txt"), &report)?;

    info!(
        "wrote {} ({} metrics over {} pairs)",
        table_path.display(),
        rows.len(),
        pairs.len()
    );
    print!("{report}");
    Ok(())
}

// Pairs the A and B scoring of each sermon by (preacher, sermon id); the
// second value counts sermons with only one run.
pub fn pair_runs(matrix: &ScoreMatrix) -> (Vec<(usize, usize)>, usize) {
    let mut slots: BTreeMap<(&str, &str), [Option<usize>; 2]> = BTreeMap::new();
    for (idx, row) in matrix.rows.iter().enumerate() {
        let slot = &mut slots
            .entry((row.preacher.as_str(), row.sermon_id.as_str()))
            .or_default()[match row.run {
            RunLabel::A => 0,
            RunLabel::B => 1,
        }];
        if slot.is_none() {
            *slot = Some(idx);
        } else {
            warn!(
                "duplicate {} row for {} ignored",
                row.run.as_str(),
                row.sermon_key
            );
        }
    }

    let mut pairs = Vec::new();
    let mut unpaired = 0;
    for runs in slots.values() {
        match runs {
            [Some(a), Some(b)] => pairs.push((*a, *b)),
            _ => unpaired += 1,
        }
    }
    (pairs, unpaired)
}

pub fn compute_reliability(
    matrix: &ScoreMatrix,
    pairs: &[(usize, usize)],
    min_pairs: usize,
) -> Vec<MetricReliability> {
    let mut rows = Vec::new();
    for (idx, metric) in matrix.metrics.iter().enumerate() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        for &(row_a, row_b) in pairs {
            if let (Some(x), Some(y)) = (matrix.values[row_a][idx], matrix.values[row_b][idx]) {
                a.push(x);
                b.push(y);
            }
        }
        if a.len() < min_pairs {
            continue;
        }
        rows.push(metric_reliability(metric, &a, &b));
    }
    rows
}

// A run with zero variance has no correlation structure to estimate, so every
// agreement statistic is withheld and only the means survive.
fn metric_reliability(metric: &str, a: &[f64], b: &[f64]) -> MetricReliability {
    let mean_a = mean(a);
    let mean_b = mean(b);
    let mut row = MetricReliability {
        metric: metric.to_string(),
        n_pairs: a.len(),
        mean_a,
        mean_b,
        mean_diff: mean_b - mean_a,
        r: None,
        r_ci_low: None,
        r_ci_high: None,
        p_value: None,
        icc_a1: None,
        icc_a1_ci_low: None,
        icc_a1_ci_high: None,
        icc_c1: None,
        icc_c1_ci_low: None,
        icc_c1_ci_high: None,
        icc_1: None,
    };
    if sample_variance(a) <= 0.0 || sample_variance(b) <= 0.0 {
        return row;
    }

    if let Some(pearson) = pearson_summary(a, b) {
        row.r = Some(pearson.r);
        if let Some((low, high)) = pearson.ci {
            row.r_ci_low = Some(low);
            row.r_ci_high = Some(high);
        }
        row.p_value = pearson.p_value;
    }
    if let Some(squares) = anova_two_way(a, b) {
        if let Some(estimate) = icc_agreement(&squares) {
            row.icc_a1 = Some(estimate.value);
            if let Some((low, high)) = estimate.ci {
                row.icc_a1_ci_low = Some(low);
                row.icc_a1_ci_high = Some(high);
            }
        }
        if let Some(estimate) = icc_consistency(&squares) {
            row.icc_c1 = Some(estimate.value);
            if let Some((low, high)) = estimate.ci {
                row.icc_c1_ci_low = Some(low);
                row.icc_c1_ci_high = Some(high);
            }
        }
        row.icc_1 = icc_oneway(&squares).map(|estimate| estimate.value);
    }
    row
}

fn write_reliability_table(rows: &[MetricReliability], path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(
        out,
        "metric\tn_pairs\tmean_a\tmean_b\tmean_diff\tr\tr_ci_low\tr_ci_high\tp_value\ticc_a1\ticc_a1_ci_low\ticc_a1_ci_high\ticc_c1\ticc_c1_ci_low\ticc_c1_ci_high\ticc_1"
    )?;
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.metric,
            row.n_pairs,
            format_f64_6(row.mean_a),
            format_f64_6(row.mean_b),
            format_f64_6(row.mean_diff),
            format_opt_f64_6(row.r),
            format_opt_f64_6(row.r_ci_low),
            format_opt_f64_6(row.r_ci_high),
            format_opt_f64_6(row.p_value),
            format_opt_f64_6(row.icc_a1),
            format_opt_f64_6(row.icc_a1_ci_low),
            format_opt_f64_6(row.icc_a1_ci_high),
            format_opt_f64_6(row.icc_c1),
            format_opt_f64_6(row.icc_c1_ci_low),
            format_opt_f64_6(row.icc_c1_ci_high),
            format_opt_f64_6(row.icc_1)
        )?;
    }
    out.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/reliability.rs"]
mod tests;
