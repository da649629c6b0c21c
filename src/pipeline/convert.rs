use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::frameworks::{composite_column, extract_metrics, frameworks};
use crate::input::corpus::{scan_corpus, CorpusScan};
use crate::input::filename::RunLabel;
use crate::input::InputError;
use crate::model::matrix::{sermon_key_for, ScoreMatrix, SermonRow};
use crate::report::{ensure_out_dir, write_score_table};

#[derive(Debug, Clone)]
pub struct ConvertParams {
    pub input_dir: PathBuf,
    pub out_dir: PathBuf,
}

pub fn run_convert(params: &ConvertParams) -> Result<(), InputError> {
    let scan = scan_corpus(&params.input_dir)?;
    if scan.analyses.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no analysis files found in {}",
            params.input_dir.display()
        )));
    }

    let mut matrix = build_score_matrix(&scan);
    let imputed = matrix.impute_composites();

    ensure_out_dir(&params.out_dir)?;
    let table_path = params.out_dir.join("scores.tsv");
    write_score_table(&matrix, &table_path)?;
    info!(
        "wrote {} ({} rows, {} metric columns)",
        table_path.display(),
        matrix.rows.len(),
        matrix.metrics.len()
    );

    print_summary(&scan, &matrix, imputed);
    Ok(())
}

// One row per (preacher, sermon, run); the first file per framework wins.
pub fn build_score_matrix(scan: &CorpusScan) -> ScoreMatrix {
    #[derive(Default)]
    struct RowAccum {
        frameworks: BTreeSet<&'static str>,
        cells: BTreeMap<String, f64>,
    }

    let mut grouped: BTreeMap<(String, String, RunLabel), RowAccum> = BTreeMap::new();
    for analysis in &scan.analyses {
        let name = &analysis.name;
        let key = (name.preacher.clone(), name.sermon_id.clone(), name.run);
        let accum = grouped.entry(key).or_default();
        if !accum.frameworks.insert(name.framework.id) {
            warn!(
                "duplicate {} analysis ignored: {}",
                name.framework.id, analysis.file_name
            );
            continue;
        }
        for (metric, value) in extract_metrics(name.framework, &analysis.data) {
            accum.cells.insert(metric, value);
        }
    }

    let mut metric_set: BTreeSet<String> = BTreeSet::new();
    for accum in grouped.values() {
        metric_set.extend(accum.cells.keys().cloned());
        // An analyzed framework always gets its composite column, even when
        // the file itself lacks the overall score.
        for fw_id in &accum.frameworks {
            metric_set.insert(composite_column(fw_id));
        }
    }

    let mut matrix = ScoreMatrix {
        metrics: metric_set.into_iter().collect(),
        ..ScoreMatrix::default()
    };
    for ((preacher, sermon_id, run), accum) in grouped {
        let values = matrix
            .metrics
            .iter()
            .map(|metric| accum.cells.get(metric).copied())
            .collect();
        matrix.rows.push(SermonRow {
            sermon_key: sermon_key_for(&preacher, &sermon_id, run),
            preacher,
            sermon_id,
            run,
            n_frameworks: accum.frameworks.len() as u32,
        });
        matrix.values.push(values);
    }
    matrix
}

fn print_summary(scan: &CorpusScan, matrix: &ScoreMatrix, imputed: usize) {
    println!("Score table summary");
    println!("===================");
    println!(
        "Files: {} found, {} loaded, {} skipped, {} unreadable",
        scan.n_files,
        scan.analyses.len(),
        scan.n_skipped,
        scan.read_errors.len()
    );
    println!("Rows (sermon x run): {}", matrix.rows.len());
    println!("Metric columns: {}", matrix.metrics.len());
    println!("Imputed composites: {imputed}");

    let mut per_preacher: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &matrix.rows {
        *per_preacher.entry(row.preacher.as_str()).or_default() += 1;
    }
    println!();
    println!("Rows per preacher:");
    for (preacher, count) in per_preacher {
        println!("  {preacher}: {count}");
    }

    let mut per_framework: BTreeMap<&str, usize> = BTreeMap::new();
    for analysis in &scan.analyses {
        *per_framework.entry(analysis.name.framework.id).or_default() += 1;
    }
    println!();
    println!("Analyses per framework:");
    for (framework, count) in per_framework {
        println!("  {framework}: {count}");
    }

    let n_frameworks = frameworks().len() as u32;
    let complete = matrix
        .rows
        .iter()
        .filter(|row| row.n_frameworks == n_frameworks)
        .count();
    println!();
    println!("Rows covered by all {n_frameworks} frameworks: {complete}");
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/convert.rs"]
mod tests;
