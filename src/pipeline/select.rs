use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::input::table::read_score_table;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;
use crate::report::{ensure_out_dir, format_f64_2, tool_version, write_json, write_score_table, TOOL_NAME};
use crate::stats::describe::{mean, round2};

#[derive(Debug, Clone)]
pub struct SelectParams {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub top: usize,
    pub by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub preacher: String,
    pub sermons: usize,
    pub mean: Option<f64>,
    pub kept: bool,
}

#[derive(Serialize)]
struct SelectionArtifact {
    tool: &'static str,
    version: &'static str,
    top: usize,
    by: Option<String>,
    ranking: Vec<RankEntry>,
}

pub fn run_select(params: &SelectParams) -> Result<(), InputError> {
    if params.top == 0 {
        return Err(InputError::InvalidInput(
            "--top must be at least 1".to_string(),
        ));
    }

    let mut matrix = read_score_table(&params.table_path)?;
    let ranking = rank_preachers(&matrix, params.by.as_deref(), params.top)?;
    let keep: BTreeSet<String> = ranking
        .iter()
        .filter(|entry| entry.kept)
        .map(|entry| entry.preacher.clone())
        .collect();
    matrix.retain_preachers(&keep);

    ensure_out_dir(&params.out_dir)?;
    let table_path = params.out_dir.join("selected.tsv");
    write_score_table(&matrix, &table_path)?;
    let artifact = SelectionArtifact {
        tool: TOOL_NAME,
        version: tool_version(),
        top: params.top,
        by: params.by.clone(),
        ranking: ranking.clone(),
    };
    write_json(&params.out_dir.join("selection.json"), &artifact)?;
    info!(
        "wrote {} ({} preachers kept, {} rows)",
        table_path.display(),
        keep.len(),
        matrix.rows.len()
    );

    print_ranking(&ranking, params.by.as_deref());
    Ok(())
}

// Rank by sermon count, or by metric mean when --by is given; the other key
// breaks ties, the preacher name settles exact ties.
pub fn rank_preachers(
    matrix: &ScoreMatrix,
    by: Option<&str>,
    top: usize,
) -> Result<Vec<RankEntry>, InputError> {
    let metric_idx = match by {
        Some(metric) => Some(matrix.metric_index(metric).ok_or_else(|| {
            InputError::InvalidInput(format!("metric {metric} not found in score table"))
        })?),
        None => None,
    };

    let mut entries: Vec<RankEntry> = matrix
        .preachers()
        .into_iter()
        .map(|preacher| {
            let sermons = matrix
                .rows
                .iter()
                .filter(|row| row.preacher == preacher)
                .count();
            let mean_score = metric_idx
                .map(|idx| matrix.preacher_values(idx, &preacher))
                .filter(|values| !values.is_empty())
                .map(|values| mean(&values));
            RankEntry {
                preacher,
                sermons,
                mean: mean_score,
                kept: false,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        let primary = if by.is_some() {
            cmp_mean_desc(a, b).then_with(|| b.sermons.cmp(&a.sermons))
        } else {
            b.sermons.cmp(&a.sermons)
        };
        primary.then_with(|| a.preacher.cmp(&b.preacher))
    });
    for entry in entries.iter_mut().take(top) {
        entry.kept = true;
    }
    for entry in &mut entries {
        entry.mean = entry.mean.map(round2);
    }
    Ok(entries)
}

// Preachers with no score on the ranking metric sort below any scored one.
fn cmp_mean_desc(a: &RankEntry, b: &RankEntry) -> Ordering {
    match (a.mean, b.mean) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn print_ranking(ranking: &[RankEntry], by: Option<&str>) {
    println!("Preacher ranking");
    println!("================");
    match by {
        Some(metric) => println!("Ranked by mean {metric}"),
        None => println!("Ranked by sermon count"),
    }
    println!();
    println!("{:<4} {:<20} {:>8} {:>8}  kept", "rank", "preacher", "sermons", "mean");
    for (position, entry) in ranking.iter().enumerate() {
        let mean_cell = entry
            .mean
            .map(format_f64_2)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<20} {:>8} {:>8}  {}",
            position + 1,
            entry.preacher,
            entry.sermons,
            mean_cell,
            if entry.kept { "yes" } else { "no" }
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/select.rs"]
mod tests;
