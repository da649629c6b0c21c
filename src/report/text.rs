use crate::report::{format_f64_2, format_f64_6};

#[derive(Debug, Clone)]
pub struct SaturationReportRow {
    pub metric: String,
    pub group: String,
    pub n: usize,
    pub saturated_k: Option<usize>,
    pub final_band: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ClusterReportContext {
    pub n_rows_used: usize,
    pub n_rows_dropped: usize,
    pub distance: String,
    pub k_grid: Vec<(usize, f64)>,
    pub chosen_k: usize,
    pub mean_silhouette: f64,
    pub cluster_sizes: Vec<usize>,
    pub medoids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReliabilityReportRow {
    pub metric: String,
    pub n_pairs: usize,
    pub r: Option<f64>,
    pub icc_a1: Option<f64>,
    pub icc_c1: Option<f64>,
    pub mean_diff: f64,
}

pub fn render_saturation_text(epsilon: f64, draws: usize, rows: &[SaturationReportRow]) -> String {
    let mut out = String::new();

    out.push_str("Score Saturation Report\n");
    out.push_str("=======================\n\n");

    out.push_str("1. Settings\n");
    out.push_str(&format!("Subsamples per size: {draws}\n"));
    out.push_str(&format!(
        "Band threshold (q95-q05): {}\n\n",
        format_f64_6(epsilon)
    ));

    out.push_str("2. Saturation points\n");
    for row in rows {
        let label = match row.saturated_k {
            Some(k) => format!("saturated at k={k}"),
            None => "not saturated".to_string(),
        };
        let band = match row.final_band {
            Some(b) => format!(", final band {}", format_f64_6(b)),
            None => String::new(),
        };
        out.push_str(&format!(
            "{} [{}] (n={}): {}{}\n",
            row.metric, row.group, row.n, label, band
        ));
    }
    out.push('\n');

    out.push_str("3. Reading\n");
    out.push_str(&format!("{}\n", saturation_statement(rows)));

    out
}

fn saturation_statement(rows: &[SaturationReportRow]) -> &'static str {
    let saturated = rows.iter().filter(|r| r.saturated_k.is_some()).count();
    if rows.is_empty() {
        "No metric had enough scores to resample."
    } else if saturated == rows.len() {
        "All metrics reach a stable mean inside the available corpus."
    } else if saturated == 0 {
        "No metric stabilizes; more sermons per group are needed."
    } else {
        "Some metrics stabilize inside the corpus; the rest need more sermons."
    }
}

pub fn render_cluster_text(ctx: &ClusterReportContext) -> String {
    let mut out = String::new();

    out.push_str("Sermon Clustering Report\n");
    out.push_str("========================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Complete cases: {}\n", ctx.n_rows_used));
    out.push_str(&format!("Dropped (incomplete): {}\n", ctx.n_rows_dropped));
    out.push_str(&format!("Distance: {}\n\n", ctx.distance));

    out.push_str("2. Model selection\n");
    for (k, silhouette) in &ctx.k_grid {
        let marker = if *k == ctx.chosen_k { "  <- chosen" } else { "" };
        out.push_str(&format!(
            "k={}: mean silhouette {}{}\n",
            k,
            format_f64_6(*silhouette),
            marker
        ));
    }
    out.push('\n');

    out.push_str("3. Chosen clustering\n");
    out.push_str(&format!("k: {}\n", ctx.chosen_k));
    out.push_str(&format!(
        "Mean silhouette: {}\n",
        format_f64_6(ctx.mean_silhouette)
    ));
    out.push_str(&format!("Medoids: {}\n", ctx.medoids.join(", ")));
    let sizes: Vec<String> = ctx.cluster_sizes.iter().map(|s| s.to_string()).collect();
    out.push_str(&format!("Cluster sizes: {}\n", sizes.join(", ")));
    out.push_str(&format!(
        "Separation: {}\n",
        silhouette_statement(ctx.mean_silhouette)
    ));

    out
}

fn silhouette_statement(mean_silhouette: f64) -> &'static str {
    if mean_silhouette >= 0.70 {
        "strong structure"
    } else if mean_silhouette >= 0.50 {
        "reasonable structure"
    } else if mean_silhouette >= 0.25 {
        "weak structure"
    } else {
        "no substantial structure"
    }
}

pub fn render_reliability_text(min_pairs: usize, rows: &[ReliabilityReportRow]) -> String {
    let mut out = String::new();

    out.push_str("Inter-Run Reliability Report\n");
    out.push_str("============================\n\n");

    out.push_str("1. Pairing\n");
    out.push_str(&format!("Metrics with >= {min_pairs} pairs: {}\n\n", rows.len()));

    out.push_str("2. Agreement per metric\n");
    for row in rows {
        let icc = match row.icc_a1 {
            Some(v) => format_f64_6(v),
            None => "n/a".to_string(),
        };
        let r = match row.r {
            Some(v) => format_f64_6(v),
            None => "n/a".to_string(),
        };
        out.push_str(&format!(
            "{} (n={}): ICC(A,1)={}, r={}, mean diff {}\n",
            row.metric,
            row.n_pairs,
            icc,
            r,
            format_f64_2(row.mean_diff)
        ));
    }
    out.push('\n');

    out.push_str("3. Flags\n");
    let poor: Vec<&str> = rows
        .iter()
        .filter(|r| r.icc_a1.is_some_and(|v| v < 0.5))
        .map(|r| r.metric.as_str())
        .collect();
    if poor.is_empty() {
        out.push_str("No metric falls below ICC(A,1) 0.5.\n");
    } else {
        out.push_str(&format!(
            "Poor inter-run agreement (ICC(A,1) < 0.5): {}\n",
            poor.join(", ")
        ));
    }
    let degenerate: Vec<&str> = rows
        .iter()
        .filter(|r| r.icc_a1.is_none())
        .map(|r| r.metric.as_str())
        .collect();
    if !degenerate.is_empty() {
        out.push_str(&format!(
            "No ICC computable (constant scores in a run): {}\n",
            degenerate.join(", ")
        ));
    }

    out
}
