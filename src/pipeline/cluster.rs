use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::input::table::read_score_table;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;
use crate::report::text::{render_cluster_text, ClusterReportContext};
use crate::report::{ensure_out_dir, format_f64_6, tool_version, write_json, write_text, TOOL_NAME};
use crate::stats::describe::{mean, round2, sample_sd};
use crate::stats::kmedoids::{pam, DistanceKind, DistanceMatrix, PamResult};
use crate::stats::silhouette::{mean_silhouette, silhouette_widths};

#[derive(Debug, Clone)]
pub struct ClusterParams {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub metrics: Vec<String>,
    pub k_min: usize,
    pub k_max: usize,
    pub distance: DistanceKind,
}

#[derive(Debug)]
pub struct ClusterModel {
    pub metrics: Vec<String>,
    pub metric_indices: Vec<usize>,
    pub row_indices: Vec<usize>,
    pub n_dropped: usize,
    pub k_grid: Vec<(usize, f64)>,
    pub chosen_k: usize,
    pub mean_width: f64,
    pub pam: PamResult,
    pub widths: Vec<f64>,
}

#[derive(Serialize)]
struct KGridEntry {
    k: usize,
    mean_silhouette: f64,
}

#[derive(Serialize)]
struct ClustersArtifact {
    tool: &'static str,
    version: &'static str,
    metrics: Vec<String>,
    distance: &'static str,
    n_rows_used: usize,
    n_rows_dropped: usize,
    k_grid: Vec<KGridEntry>,
    chosen_k: usize,
    mean_silhouette: f64,
    medoids: Vec<String>,
    cluster_sizes: Vec<usize>,
    cluster_means: Vec<BTreeMap<String, f64>>,
}

pub fn run_cluster(params: &ClusterParams) -> Result<(), InputError> {
    let matrix = read_score_table(&params.table_path)?;
    let model = fit_clusters(&matrix, params)?;

    ensure_out_dir(&params.out_dir)?;
    let table_path = params.out_dir.join("clusters.tsv");
    write_assignment_table(&matrix, &model, &table_path)?;

    let sizes = cluster_sizes(&model);
    let medoid_keys: Vec<String> = model
        .pam
        .medoids
        .iter()
        .map(|&m| matrix.rows[model.row_indices[m]].sermon_key.clone())
        .collect();
    let artifact = ClustersArtifact {
        tool: TOOL_NAME,
        version: tool_version(),
        metrics: model.metrics.clone(),
        distance: params.distance.as_str(),
        n_rows_used: model.row_indices.len(),
        n_rows_dropped: model.n_dropped,
        k_grid: model
            .k_grid
            .iter()
            .map(|&(k, mean_silhouette)| KGridEntry { k, mean_silhouette })
            .collect(),
        chosen_k: model.chosen_k,
        mean_silhouette: model.mean_width,
        medoids: medoid_keys.clone(),
        cluster_sizes: sizes.clone(),
        cluster_means: cluster_means(&matrix, &model),
    };
    write_json(&params.out_dir.join("clusters.json"), &artifact)?;

    let report = render_cluster_text(&ClusterReportContext {
        n_rows_used: model.row_indices.len(),
        n_rows_dropped: model.n_dropped,
        distance: params.distance.as_str().to_string(),
        k_grid: model.k_grid.clone(),
        chosen_k: model.chosen_k,
        mean_silhouette: model.mean_width,
        cluster_sizes: sizes,
        medoids: medoid_keys,
    });
    write_text(&params.out_dir.join("clusters_report.txt"), &report)?;

    info!(
        "wrote {} ({} rows, k={})",
        table_path.display(),
        model.row_indices.len(),
        model.chosen_k
    );
    print!("{report}");
    Ok(())
}

pub fn fit_clusters(matrix: &ScoreMatrix, params: &ClusterParams) -> Result<ClusterModel, InputError> {
    let k_min = params.k_min.max(2);
    if params.k_max < k_min {
        return Err(InputError::InvalidInput(format!(
            "--k-max {} is below the smallest usable k {}",
            params.k_max, k_min
        )));
    }

    let metrics = super::resolve_metric_columns(matrix, &params.metrics)?;
    let metric_indices: Vec<usize> = metrics
        .iter()
        .filter_map(|metric| matrix.metric_index(metric))
        .collect();
    let row_indices = matrix.complete_rows(&metric_indices);
    let n = row_indices.len();
    let n_dropped = matrix.n_rows() - n;
    if n < k_min + 1 {
        return Err(InputError::InvalidInput(format!(
            "{n} complete cases are too few to cluster with k >= {k_min}"
        )));
    }
    let k_max = params.k_max.min(n - 1);

    let features = standardized_features(matrix, &row_indices, &metric_indices);
    let dist = DistanceMatrix::from_features(&features, params.distance);

    let mut fits = Vec::new();
    for k in k_min..=k_max {
        let result = pam(&dist, k);
        let widths = silhouette_widths(&dist, &result.assignment, k);
        let score = mean_silhouette(&widths);
        fits.push((k, score, result, widths));
    }
    let k_grid: Vec<(usize, f64)> = fits.iter().map(|fit| (fit.0, fit.1)).collect();
    // ties on mean silhouette keep the smaller k
    let (chosen_k, mean_width, pam_fit, widths) = fits
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .ok_or_else(|| InputError::InvalidInput("empty k grid".to_string()))?;

    Ok(ClusterModel {
        metrics,
        metric_indices,
        row_indices,
        n_dropped,
        k_grid,
        chosen_k,
        mean_width,
        pam: pam_fit,
        widths,
    })
}

// z-scores per metric; a constant column contributes nothing to the distance.
fn standardized_features(
    matrix: &ScoreMatrix,
    rows: &[usize],
    indices: &[usize],
) -> Vec<Vec<f64>> {
    let mut columns = Vec::with_capacity(indices.len());
    for &idx in indices {
        let values: Vec<f64> = rows
            .iter()
            .map(|&row| {
                matrix.values[row][idx].expect("complete rows carry every selected metric")
            })
            .collect();
        let center = mean(&values);
        let spread = sample_sd(&values);
        columns.push((values, center, spread));
    }
    (0..rows.len())
        .map(|row| {
            columns
                .iter()
                .map(|(values, center, spread)| {
                    if *spread > 0.0 {
                        (values[row] - center) / spread
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

pub fn cluster_sizes(model: &ClusterModel) -> Vec<usize> {
    let mut sizes = vec![0usize; model.chosen_k];
    for &cluster in &model.pam.assignment {
        sizes[cluster] += 1;
    }
    sizes
}

// Per-cluster metric means in original score units.
fn cluster_means(matrix: &ScoreMatrix, model: &ClusterModel) -> Vec<BTreeMap<String, f64>> {
    let mut sums = vec![vec![0.0; model.metric_indices.len()]; model.chosen_k];
    let mut counts = vec![0usize; model.chosen_k];
    for (pos, &row_idx) in model.row_indices.iter().enumerate() {
        let cluster = model.pam.assignment[pos];
        counts[cluster] += 1;
        for (col, &idx) in model.metric_indices.iter().enumerate() {
            if let Some(value) = matrix.values[row_idx][idx] {
                sums[cluster][col] += value;
            }
        }
    }
    sums.iter()
        .zip(&counts)
        .map(|(cluster_sums, &count)| {
            model
                .metrics
                .iter()
                .zip(cluster_sums)
                .map(|(metric, sum)| (metric.clone(), round2(sum / count.max(1) as f64)))
                .collect()
        })
        .collect()
}

fn write_assignment_table(
    matrix: &ScoreMatrix,
    model: &ClusterModel,
    path: &Path,
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "sermon_key\tpreacher\tcluster\tsilhouette")?;
    for (pos, &row_idx) in model.row_indices.iter().enumerate() {
        let row = &matrix.rows[row_idx];
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            row.sermon_key,
            row.preacher,
            model.pam.assignment[pos] + 1,
            format_f64_6(model.widths[pos])
        )?;
    }
    out.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/cluster.rs"]
mod tests;
