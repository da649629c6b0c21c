// Quantile of pre-sorted data by linear interpolation between closest ranks.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// Exclusive quartile method: cut points of sorted data extended below the
// minimum and above the maximum, interpolated in steps of 1/4. Requires at
// least two values.
pub fn quartiles_exclusive(sorted: &[f64]) -> Option<(f64, f64, f64)> {
    let n = sorted.len();
    if n < 2 {
        return None;
    }
    let mut cuts = [0.0f64; 3];
    for (idx, cut) in cuts.iter_mut().enumerate() {
        let i = idx + 1;
        let mut j = i * (n + 1) / 4;
        let delta = (i * (n + 1)) % 4;
        j = j.clamp(1, n - 1);
        *cut = (sorted[j - 1] * (4 - delta) as f64 + sorted[j] * delta as f64) / 4.0;
    }
    Some((cuts[0], cuts[1], cuts[2]))
}

// Small-sample fallback used for violin boxes when fewer than four values
// exist: plain sorted-index picks.
pub fn quartiles_indexed(sorted: &[f64]) -> Option<(f64, f64)> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some((sorted[0], sorted[0]));
    }
    Some((sorted[n / 4], sorted[(3 * n) / 4]))
}
