use std::io::BufRead;
use std::path::Path;

use crate::input::filename::RunLabel;
use crate::input::{InputError, open_maybe_gz};
use crate::model::matrix::{ScoreMatrix, SermonRow};

pub const FIXED_COLUMNS: &[&str] = &["sermon_key", "preacher", "sermon_id", "run", "n_frameworks"];

pub fn read_score_table(path: &Path) -> Result<ScoreMatrix, InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(format!(
            "score table {} not found",
            path.display()
        )));
    }
    let reader = open_maybe_gz(path)?;
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(InputError::InvalidInput(format!(
                "score table {} is empty",
                path.display()
            )));
        }
    };
    let columns: Vec<&str> = header.split('\t').collect();
    if columns.len() < FIXED_COLUMNS.len() || columns[..FIXED_COLUMNS.len()] != *FIXED_COLUMNS {
        return Err(InputError::InvalidInput(format!(
            "score table {} must start with columns {}",
            path.display(),
            FIXED_COLUMNS.join(", ")
        )));
    }
    let metrics: Vec<String> = columns[FIXED_COLUMNS.len()..]
        .iter()
        .map(|c| c.to_string())
        .collect();

    let mut matrix = ScoreMatrix {
        rows: Vec::new(),
        metrics,
        values: Vec::new(),
    };
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 2;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != columns.len() {
            return Err(InputError::Parse(format!(
                "line {line_no}: expected {} fields, found {}",
                columns.len(),
                fields.len()
            )));
        }
        let run = RunLabel::parse(fields[3]).ok_or_else(|| {
            InputError::Parse(format!("line {line_no}: invalid run label '{}'", fields[3]))
        })?;
        let n_frameworks: u32 = fields[4].parse().map_err(|_| {
            InputError::Parse(format!(
                "line {line_no}: invalid framework count '{}'",
                fields[4]
            ))
        })?;
        let mut row_values = Vec::with_capacity(matrix.metrics.len());
        for (field, metric) in fields[FIXED_COLUMNS.len()..].iter().zip(&matrix.metrics) {
            if field.is_empty() {
                row_values.push(None);
            } else {
                let value: f64 = field.parse().map_err(|_| {
                    InputError::Parse(format!(
                        "line {line_no}: invalid value '{field}' for {metric}"
                    ))
                })?;
                row_values.push(Some(value));
            }
        }
        matrix.rows.push(SermonRow {
            sermon_key: fields[0].to_string(),
            preacher: fields[1].to_string(),
            sermon_id: fields[2].to_string(),
            run,
            n_frameworks,
        });
        matrix.values.push(row_values);
    }
    Ok(matrix)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
