use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::frameworks::in_scope;
use crate::input::table::read_score_table;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;
use crate::report::{ensure_out_dir, tool_version, write_json, TOOL_NAME};
use crate::stats::describe::{mean, median, round2};
use crate::stats::quantile::{quartiles_exclusive, quartiles_indexed};

#[derive(Debug, Clone)]
pub struct ViolinParams {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub detailed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolinSummary {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolinSeries {
    pub values: Vec<f64>,
    pub summary: ViolinSummary,
    pub count: usize,
}

#[derive(Serialize)]
struct ViolinArtifact {
    tool: &'static str,
    version: &'static str,
    scope: &'static str,
    preachers: Vec<String>,
    sermon_counts: BTreeMap<String, usize>,
    metrics: BTreeMap<String, BTreeMap<String, ViolinSeries>>,
}

pub fn run_violin(params: &ViolinParams) -> Result<(), InputError> {
    let matrix = read_score_table(&params.table_path)?;

    let mut sermon_counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in &matrix.rows {
        *sermon_counts.entry(row.preacher.clone()).or_default() += 1;
    }

    let artifact = ViolinArtifact {
        tool: TOOL_NAME,
        version: tool_version(),
        scope: super::group_stats::scope_name(params.detailed),
        preachers: matrix.preachers(),
        sermon_counts,
        metrics: compute_violin_series(&matrix, params.detailed),
    };

    ensure_out_dir(&params.out_dir)?;
    let out_path = params.out_dir.join("violin_data.json");
    write_json(&out_path, &artifact)?;
    info!(
        "wrote {} ({} metrics, {} preachers)",
        out_path.display(),
        artifact.metrics.len(),
        artifact.preachers.len()
    );

    println!("Preachers: {}", artifact.preachers.len());
    println!("Metrics in {} scope: {}", artifact.scope, artifact.metrics.len());
    Ok(())
}

pub fn compute_violin_series(
    matrix: &ScoreMatrix,
    detailed: bool,
) -> BTreeMap<String, BTreeMap<String, ViolinSeries>> {
    let preachers = matrix.preachers();
    let mut out = BTreeMap::new();
    for (idx, metric) in matrix.metrics.iter().enumerate() {
        if !in_scope(metric, detailed) {
            continue;
        }
        let mut per_preacher = BTreeMap::new();
        for preacher in &preachers {
            let values = matrix.preacher_values(idx, preacher);
            if let Some(series) = violin_series(&values) {
                per_preacher.insert(preacher.clone(), series);
            }
        }
        if !per_preacher.is_empty() {
            out.insert(metric.clone(), per_preacher);
        }
    }
    out
}

// Below four points the exclusive-median quartiles are undefined, so small
// series fall back to plain index quartiles.
pub fn violin_series(values: &[f64]) -> Option<ViolinSeries> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();

    let (q1, q3) = if n >= 4 {
        let (q1, _, q3) = quartiles_exclusive(&sorted)?;
        (q1, q3)
    } else {
        quartiles_indexed(&sorted)?
    };

    let summary = ViolinSummary {
        min: round2(sorted[0]),
        max: round2(sorted[n - 1]),
        median: round2(median(&sorted)),
        q1: round2(q1),
        q3: round2(q3),
        mean: round2(mean(&sorted)),
    };
    Some(ViolinSeries {
        values: sorted.into_iter().map(round2).collect(),
        summary,
        count: n,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/violin.rs"]
mod tests;
