use std::collections::BTreeSet;

use crate::frameworks::{composite_column, frameworks};
use crate::input::filename::RunLabel;
use crate::stats::describe::mean;

#[derive(Debug, Clone)]
pub struct SermonRow {
    pub sermon_key: String,
    pub preacher: String,
    pub sermon_id: String,
    pub run: RunLabel,
    pub n_frameworks: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreMatrix {
    pub rows: Vec<SermonRow>,
    pub metrics: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

pub fn sermon_key_for(preacher: &str, sermon_id: &str, run: RunLabel) -> String {
    match run {
        RunLabel::A => format!("{preacher}_{sermon_id}"),
        RunLabel::B => format!("{preacher}_{sermon_id}_B"),
    }
}

impl ScoreMatrix {
    pub fn metric_index(&self, name: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == name)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn preachers(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.preacher.as_str()).collect();
        set.into_iter().map(|p| p.to_string()).collect()
    }

    pub fn column_values(&self, metric: usize) -> Vec<f64> {
        self.values.iter().filter_map(|row| row[metric]).collect()
    }

    pub fn preacher_values(&self, metric: usize, preacher: &str) -> Vec<f64> {
        self.rows
            .iter()
            .zip(&self.values)
            .filter(|(row, _)| row.preacher == preacher)
            .filter_map(|(_, values)| values[metric])
            .collect()
    }

    pub fn complete_rows(&self, metric_indices: &[usize]) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&r| metric_indices.iter().all(|&m| self.values[r][m].is_some()))
            .collect()
    }

    pub fn retain_preachers(&mut self, keep: &BTreeSet<String>) {
        let mut kept_values = Vec::with_capacity(self.values.len());
        let mut kept_rows = Vec::with_capacity(self.rows.len());
        for (row, values) in self.rows.drain(..).zip(self.values.drain(..)) {
            if keep.contains(&row.preacher) {
                kept_rows.push(row);
                kept_values.push(values);
            }
        }
        self.rows = kept_rows;
        self.values = kept_values;
    }

    // Fill a missing composite from the framework's sub-scores when at least
    // two of them are present. Returns the number of filled cells.
    pub fn impute_composites(&mut self) -> usize {
        let mut imputed = 0;
        for fw in frameworks() {
            let Some(composite_idx) = self.metric_index(&composite_column(fw.id)) else {
                continue;
            };
            let prefix = format!("{}.", fw.id);
            let sub_indices: Vec<usize> = self
                .metrics
                .iter()
                .enumerate()
                .filter(|(i, name)| *i != composite_idx && name.starts_with(&prefix))
                .map(|(i, _)| i)
                .collect();
            if sub_indices.len() < 2 {
                continue;
            }
            for row_values in &mut self.values {
                if row_values[composite_idx].is_some() {
                    continue;
                }
                let present: Vec<f64> =
                    sub_indices.iter().filter_map(|&i| row_values[i]).collect();
                if present.len() >= 2 {
                    row_values[composite_idx] = Some(mean(&present));
                    imputed += 1;
                }
            }
        }
        imputed
    }
}
