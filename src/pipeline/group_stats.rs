use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::frameworks::in_scope;
use crate::input::table::read_score_table;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;
use crate::report::{ensure_out_dir, tool_version, write_json, TOOL_NAME};
use crate::stats::describe::{mean, population_sd, round2};

#[derive(Debug, Clone)]
pub struct StatsParams {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupStats {
    pub mean: f64,
    pub sd: f64,
    pub count: usize,
}

#[derive(Serialize)]
struct StatsArtifact {
    tool: &'static str,
    version: &'static str,
    scope: &'static str,
    preachers: Vec<String>,
    metrics: BTreeMap<String, BTreeMap<String, GroupStats>>,
}

pub fn run_stats(params: &StatsParams) -> Result<(), InputError> {
    let matrix = read_score_table(&params.table_path)?;
    let artifact = StatsArtifact {
        tool: TOOL_NAME,
        version: tool_version(),
        scope: scope_name(params.detailed),
        preachers: matrix.preachers(),
        metrics: compute_group_stats(&matrix, params.detailed),
    };

    ensure_out_dir(&params.out_dir)?;
    let out_path = params.out_dir.join("statistics.json");
    write_json(&out_path, &artifact)?;
    info!(
        "wrote {} ({} metrics, {} preachers, scope {})",
        out_path.display(),
        artifact.metrics.len(),
        artifact.preachers.len(),
        artifact.scope
    );

    println!("Preachers: {}", artifact.preachers.len());
    println!("Metrics in {} scope: {}", artifact.scope, artifact.metrics.len());
    Ok(())
}

pub fn scope_name(detailed: bool) -> &'static str {
    if detailed {
        "detailed"
    } else {
        "summary"
    }
}

pub fn compute_group_stats(
    matrix: &ScoreMatrix,
    detailed: bool,
) -> BTreeMap<String, BTreeMap<String, GroupStats>> {
    let preachers = matrix.preachers();
    let mut out = BTreeMap::new();
    for (idx, metric) in matrix.metrics.iter().enumerate() {
        if !in_scope(metric, detailed) {
            continue;
        }
        let mut per_preacher = BTreeMap::new();
        for preacher in &preachers {
            let values = matrix.preacher_values(idx, preacher);
            if values.is_empty() {
                continue;
            }
            per_preacher.insert(
                preacher.clone(),
                GroupStats {
                    mean: round2(mean(&values)),
                    sd: round2(population_sd(&values)),
                    count: values.len(),
                },
            );
        }
        if !per_preacher.is_empty() {
            out.insert(metric.clone(), per_preacher);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/group_stats.rs"]
mod tests;
