use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::input::InputError;
use crate::input::table::FIXED_COLUMNS;
use crate::model::matrix::ScoreMatrix;

pub mod text;

pub const TOOL_NAME: &str = "homilostat";

pub fn tool_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn format_opt_f64_6(v: Option<f64>) -> String {
    v.map(format_f64_6).unwrap_or_default()
}

pub fn ensure_out_dir(out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)
}

pub fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, artifact: &T) -> Result<(), InputError> {
    let mut text = serde_json::to_string_pretty(artifact)
        .map_err(|e| InputError::InvalidInput(format!("json serialization: {e}")))?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

pub fn write_score_table(matrix: &ScoreMatrix, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    // Header
    write!(w, "{}", FIXED_COLUMNS.join("\t"))?;
    for metric in &matrix.metrics {
        write!(w, "\t{}", metric)?;
    }
    writeln!(w)?;

    for (row, values) in matrix.rows.iter().zip(&matrix.values) {
        write!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            row.sermon_key,
            row.preacher,
            row.sermon_id,
            row.run.as_str(),
            row.n_frameworks
        )?;
        for value in values {
            write!(w, "\t{}", format_opt_f64_6(*value))?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}
