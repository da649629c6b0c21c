use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::input::table::read_score_table;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;
use crate::report::text::{render_saturation_text, SaturationReportRow};
use crate::report::{ensure_out_dir, format_f64_6, tool_version, write_json, write_text, TOOL_NAME};
use crate::stats::resample::{stream_seed, subsample_at, DrawSummary};

#[derive(Debug, Clone)]
pub struct SaturationParams {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub metrics: Vec<String>,
    pub min_size: usize,
    pub max_size: Option<usize>,
    pub step: usize,
    pub draws: usize,
    pub seed: u64,
    pub epsilon: f64,
    pub group_by_preacher: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCurve {
    pub metric: String,
    pub group: String,
    pub n: usize,
    pub saturated_k: Option<usize>,
    pub points: Vec<DrawSummary>,
}

#[derive(Serialize)]
struct SaturationArtifact {
    tool: &'static str,
    version: &'static str,
    draws: usize,
    seed: u64,
    epsilon: f64,
    step: usize,
    min_size: usize,
    max_size: Option<usize>,
    group_by: Option<&'static str>,
    curves: Vec<MetricCurve>,
}

pub fn run_saturation(params: &SaturationParams) -> Result<(), InputError> {
    if params.draws == 0 {
        return Err(InputError::InvalidInput(
            "--draws must be at least 1".to_string(),
        ));
    }
    if params.step == 0 {
        return Err(InputError::InvalidInput(
            "--step must be at least 1".to_string(),
        ));
    }
    if params.epsilon <= 0.0 {
        return Err(InputError::InvalidInput(
            "--epsilon must be positive".to_string(),
        ));
    }

    let matrix = read_score_table(&params.table_path)?;
    let curves = compute_curves(&matrix, params)?;

    ensure_out_dir(&params.out_dir)?;
    let table_path = params.out_dir.join("saturation.tsv");
    write_curve_table(&curves, &table_path)?;

    let artifact = SaturationArtifact {
        tool: TOOL_NAME,
        version: tool_version(),
        draws: params.draws,
        seed: params.seed,
        epsilon: params.epsilon,
        step: params.step,
        min_size: params.min_size.max(2),
        max_size: params.max_size,
        group_by: params.group_by_preacher.then_some("preacher"),
        curves: curves.clone(),
    };
    write_json(&params.out_dir.join("saturation.json"), &artifact)?;

    let report_rows: Vec<SaturationReportRow> = curves
        .iter()
        .map(|curve| SaturationReportRow {
            metric: curve.metric.clone(),
            group: curve.group.clone(),
            n: curve.n,
            saturated_k: curve.saturated_k,
            final_band: curve
                .points
                .last()
                .map(|point| point.q95_mean - point.q05_mean),
        })
        .collect();
    let report = render_saturation_text(params.epsilon, params.draws, &report_rows);
    write_text(&params.out_dir.join("saturation_report.txt"), &report)?;

    info!(
        "wrote {} ({} curves, {} draws per point)",
        table_path.display(),
        curves.len(),
        params.draws
    );
    print!("{report}");
    Ok(())
}

pub fn compute_curves(
    matrix: &ScoreMatrix,
    params: &SaturationParams,
) -> Result<Vec<MetricCurve>, InputError> {
    let metrics = super::resolve_metric_columns(matrix, &params.metrics)?;
    let groups: Vec<String> = if params.group_by_preacher {
        matrix.preachers()
    } else {
        vec!["all".to_string()]
    };
    let min_size = if params.min_size < 2 {
        warn!("subsample sizes below 2 carry no variance, raising min size to 2");
        2
    } else {
        params.min_size
    };

    let mut curves = Vec::new();
    for metric in &metrics {
        let idx = match matrix.metric_index(metric) {
            Some(idx) => idx,
            None => continue,
        };
        for group in &groups {
            let values = if params.group_by_preacher {
                matrix.preacher_values(idx, group)
            } else {
                matrix.column_values(idx)
            };
            let n = values.len();
            let hi = params.max_size.unwrap_or(n).min(n);
            if n < min_size || hi < min_size {
                warn!("skipping {metric} [{group}]: only {n} scores");
                continue;
            }

            let mut points = Vec::new();
            let mut k = min_size;
            while k <= hi {
                let seed = stream_seed(params.seed, metric, group, k);
                points.push(subsample_at(&values, k, params.draws, seed));
                k += params.step;
            }
            let saturated_k = saturated_k(&points, params.epsilon);
            curves.push(MetricCurve {
                metric: metric.clone(),
                group: group.clone(),
                n,
                saturated_k,
                points,
            });
        }
    }
    if curves.is_empty() {
        return Err(InputError::InvalidInput(
            "no metric has enough scores to resample".to_string(),
        ));
    }
    Ok(curves)
}

// Saturation point: the smallest k from which the 90% band of subsample means
// stays within epsilon through the end of the grid.
pub fn saturated_k(points: &[DrawSummary], epsilon: f64) -> Option<usize> {
    let mut saturated = None;
    for point in points.iter().rev() {
        if point.q95_mean - point.q05_mean <= epsilon {
            saturated = Some(point.k);
        } else {
            break;
        }
    }
    saturated
}

fn write_curve_table(curves: &[MetricCurve], path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(
        out,
        "metric\tgroup\tn\tk\tdraws\tmean_mean\tsd_mean\tq05_mean\tq50_mean\tq95_mean\tmean_var\tq05_var\tq50_var\tq95_var"
    )?;
    for curve in curves {
        for point in &curve.points {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                curve.metric,
                curve.group,
                curve.n,
                point.k,
                point.draws,
                format_f64_6(point.mean_mean),
                format_f64_6(point.sd_mean),
                format_f64_6(point.q05_mean),
                format_f64_6(point.q50_mean),
                format_f64_6(point.q95_mean),
                format_f64_6(point.mean_var),
                format_f64_6(point.q05_var),
                format_f64_6(point.q50_var),
                format_f64_6(point.q95_var)
            )?;
        }
    }
    out.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/saturation.rs"]
mod tests;
