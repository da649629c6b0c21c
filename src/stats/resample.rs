use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::stats::describe::{mean, sample_sd, sample_variance};
use crate::stats::quantile::quantile_sorted;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawSummary {
    pub k: usize,
    pub draws: usize,
    pub mean_mean: f64,
    pub sd_mean: f64,
    pub q05_mean: f64,
    pub q50_mean: f64,
    pub q95_mean: f64,
    pub mean_var: f64,
    pub q05_var: f64,
    pub q50_var: f64,
    pub q95_var: f64,
}

// Derives a per-(metric, group, k) stream from the root seed (FNV-1a fold),
// so the draw sequence does not depend on evaluation order.
pub fn stream_seed(root: u64, metric: &str, group: &str, k: usize) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for chunk in [
        &root.to_le_bytes()[..],
        metric.as_bytes(),
        group.as_bytes(),
        &(k as u64).to_le_bytes()[..],
    ] {
        for &byte in chunk {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
    }
    hash
}

pub fn subsample_at(values: &[f64], k: usize, draws: usize, seed: u64) -> DrawSummary {
    debug_assert!(k >= 1 && k <= values.len());
    // k == n: a single distinct subsample exists, report it exactly.
    if k == values.len() {
        let m = mean(values);
        let v = sample_variance(values);
        return DrawSummary {
            k,
            draws,
            mean_mean: m,
            sd_mean: 0.0,
            q05_mean: m,
            q50_mean: m,
            q95_mean: m,
            mean_var: v,
            q05_var: v,
            q50_var: v,
            q95_var: v,
        };
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut means = Vec::with_capacity(draws);
    let mut vars = Vec::with_capacity(draws);
    let mut subsample = Vec::with_capacity(k);
    for _ in 0..draws {
        subsample.clear();
        for idx in rand::seq::index::sample(&mut rng, values.len(), k) {
            subsample.push(values[idx]);
        }
        means.push(mean(&subsample));
        vars.push(sample_variance(&subsample));
    }

    let mean_mean = mean(&means);
    let sd_mean = sample_sd(&means);
    let mean_var = mean(&vars);
    means.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    vars.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    DrawSummary {
        k,
        draws,
        mean_mean,
        sd_mean,
        q05_mean: quantile_sorted(&means, 0.05),
        q50_mean: quantile_sorted(&means, 0.50),
        q95_mean: quantile_sorted(&means, 0.95),
        mean_var,
        q05_var: quantile_sorted(&vars, 0.05),
        q50_var: quantile_sorted(&vars, 0.50),
        q95_var: quantile_sorted(&vars, 0.95),
    }
}
