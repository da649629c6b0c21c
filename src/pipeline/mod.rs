use crate::frameworks::composite_columns;
use crate::input::InputError;
use crate::model::matrix::ScoreMatrix;

pub mod cluster;
pub mod completeness;
pub mod convert;
pub mod group_stats;
pub mod reliability;
pub mod saturation;
pub mod select;
pub mod violin;

// Explicit metric lists are validated against the table; an empty list falls
// back to whichever composite columns the table carries.
pub(crate) fn resolve_metric_columns(
    matrix: &ScoreMatrix,
    requested: &[String],
) -> Result<Vec<String>, InputError> {
    if requested.is_empty() {
        let present: Vec<String> = composite_columns()
            .into_iter()
            .filter(|column| matrix.metric_index(column).is_some())
            .collect();
        if present.is_empty() {
            return Err(InputError::InvalidInput(
                "score table has no composite columns".to_string(),
            ));
        }
        return Ok(present);
    }
    for metric in requested {
        if matrix.metric_index(metric).is_none() {
            return Err(InputError::InvalidInput(format!(
                "metric {metric} not found in score table"
            )));
        }
    }
    Ok(requested.to_vec())
}
