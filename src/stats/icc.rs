use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::stats::describe::mean;

// Raters are the two scoring runs, so k is fixed.
const K: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
pub struct AnovaSquares {
    pub n: usize,
    pub msr: f64,
    pub msc: f64,
    pub mse: f64,
    pub msw: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct IccEstimate {
    pub value: f64,
    pub ci: Option<(f64, f64)>,
}

pub fn anova_two_way(a: &[f64], b: &[f64]) -> Option<AnovaSquares> {
    let n = a.len();
    if n < 2 || b.len() != n {
        return None;
    }
    let nf = n as f64;
    let mean_a = mean(a);
    let mean_b = mean(b);
    let grand = (mean_a + mean_b) / 2.0;

    let ssr: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let row_mean = (x + y) / 2.0;
            K * (row_mean - grand) * (row_mean - grand)
        })
        .sum();
    let ssc = nf * ((mean_a - grand) * (mean_a - grand) + (mean_b - grand) * (mean_b - grand));
    let sst: f64 = a
        .iter()
        .chain(b)
        .map(|x| (x - grand) * (x - grand))
        .sum();
    let sse = (sst - ssr - ssc).max(0.0);
    let ssw = (sst - ssr).max(0.0);

    Some(AnovaSquares {
        n,
        msr: ssr / (nf - 1.0),
        msc: ssc / (K - 1.0),
        mse: sse / ((nf - 1.0) * (K - 1.0)),
        msw: ssw / (nf * (K - 1.0)),
    })
}

// ICC(1,1): one-way random effects, absolute agreement.
pub fn icc_oneway(sq: &AnovaSquares) -> Option<IccEstimate> {
    let value = finite_ratio(sq.msr - sq.msw, sq.msr + (K - 1.0) * sq.msw)?;
    Some(IccEstimate {
        value,
        ci: oneway_ci(sq),
    })
}

// ICC(A,1): two-way random effects, absolute agreement.
pub fn icc_agreement(sq: &AnovaSquares) -> Option<IccEstimate> {
    let nf = sq.n as f64;
    let value = finite_ratio(
        sq.msr - sq.mse,
        sq.msr + (K - 1.0) * sq.mse + (K / nf) * (sq.msc - sq.mse),
    )?;
    Some(IccEstimate {
        value,
        ci: agreement_ci(sq, value),
    })
}

// ICC(C,1): two-way mixed effects, consistency.
pub fn icc_consistency(sq: &AnovaSquares) -> Option<IccEstimate> {
    let value = finite_ratio(sq.msr - sq.mse, sq.msr + (K - 1.0) * sq.mse)?;
    Some(IccEstimate {
        value,
        ci: consistency_ci(sq),
    })
}

fn finite_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator <= 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

fn f_quantile(df1: f64, df2: f64, p: f64) -> Option<f64> {
    if !df1.is_finite() || !df2.is_finite() || df1 <= 0.0 || df2 <= 0.0 {
        return None;
    }
    Some(FisherSnedecor::new(df1, df2).ok()?.inverse_cdf(p))
}

fn oneway_ci(sq: &AnovaSquares) -> Option<(f64, f64)> {
    if sq.msw <= 0.0 {
        return None;
    }
    let nf = sq.n as f64;
    let f = sq.msr / sq.msw;
    let df1 = nf - 1.0;
    let df2 = nf * (K - 1.0);
    let fl = f / f_quantile(df1, df2, 0.975)?;
    let fu = f * f_quantile(df2, df1, 0.975)?;
    Some(clamp_interval(
        (fl - 1.0) / (fl + K - 1.0),
        (fu - 1.0) / (fu + K - 1.0),
    ))
}

fn consistency_ci(sq: &AnovaSquares) -> Option<(f64, f64)> {
    if sq.mse <= 0.0 {
        return None;
    }
    let nf = sq.n as f64;
    let f = sq.msr / sq.mse;
    let df1 = nf - 1.0;
    let df2 = (nf - 1.0) * (K - 1.0);
    let fl = f / f_quantile(df1, df2, 0.975)?;
    let fu = f * f_quantile(df2, df1, 0.975)?;
    Some(clamp_interval(
        (fl - 1.0) / (fl + K - 1.0),
        (fu - 1.0) / (fu + K - 1.0),
    ))
}

// Satterthwaite approximation for the ICC(A,1) interval (McGraw & Wong).
fn agreement_ci(sq: &AnovaSquares, icc: f64) -> Option<(f64, f64)> {
    if sq.mse <= 0.0 {
        return None;
    }
    let nf = sq.n as f64;
    let fj = sq.msc / sq.mse;
    let a = K * icc * fj + nf * (1.0 + (K - 1.0) * icc) - K * icc;
    let vn = (K - 1.0) * (nf - 1.0) * a * a;
    let b = nf * (1.0 + (K - 1.0) * icc) - K * icc;
    let vd = (nf - 1.0) * K * K * icc * icc * fj * fj + b * b;
    if vd <= 0.0 {
        return None;
    }
    let v = vn / vd;
    let f_upper = f_quantile(nf - 1.0, v, 0.975)?;
    let f_lower = f_quantile(v, nf - 1.0, 0.975)?;
    let mixed = K * sq.msc + (K * nf - K - nf) * sq.mse;
    let lo_den = f_upper * mixed + nf * sq.msr;
    let hi_den = mixed + nf * f_lower * sq.msr;
    if lo_den <= 0.0 || hi_den <= 0.0 {
        return None;
    }
    Some(clamp_interval(
        nf * (sq.msr - f_upper * sq.mse) / lo_den,
        nf * (f_lower * sq.msr - sq.mse) / hi_den,
    ))
}

fn clamp_interval(lo: f64, hi: f64) -> (f64, f64) {
    (lo.clamp(-1.0, 1.0), hi.clamp(-1.0, 1.0))
}
