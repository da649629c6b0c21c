use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::stats::describe::mean;

#[derive(Debug, Clone, Copy)]
pub struct PearsonSummary {
    pub r: f64,
    pub ci: Option<(f64, f64)>,
    pub p_value: Option<f64>,
}

pub fn pearson_summary(xs: &[f64], ys: &[f64]) -> Option<PearsonSummary> {
    let r = pearson_r(xs, ys)?;
    Some(PearsonSummary {
        r,
        ci: fisher_z_ci(r, xs.len(), 0.95),
        p_value: student_t_p(r, xs.len()),
    })
}

// None when either series has zero variance.
pub fn pearson_r(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs);
    let my = mean(ys);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

// Fisher z-transform interval; the transform needs n > 3.
pub fn fisher_z_ci(r: f64, n: usize, confidence: f64) -> Option<(f64, f64)> {
    if n < 4 {
        return None;
    }
    let se = 1.0 / ((n - 3) as f64).sqrt();
    let normal = Normal::new(0.0, 1.0).ok()?;
    let z_crit = normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);
    let z = r.atanh();
    Some(((z - z_crit * se).tanh(), (z + z_crit * se).tanh()))
}

// Two-sided p under t with n-2 degrees of freedom.
pub fn student_t_p(r: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Some(0.0);
    }
    let t = r * (df / denom).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).max(0.0))
}
