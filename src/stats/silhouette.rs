use crate::stats::kmedoids::DistanceMatrix;

// Silhouette width per point; singleton clusters get 0 by convention.
pub fn silhouette_widths(dist: &DistanceMatrix, assignment: &[usize], k: usize) -> Vec<f64> {
    let n = dist.len();
    debug_assert_eq!(assignment.len(), n);
    let mut sizes = vec![0usize; k];
    for &cluster in assignment {
        sizes[cluster] += 1;
    }

    let mut widths = Vec::with_capacity(n);
    for i in 0..n {
        let own = assignment[i];
        if sizes[own] <= 1 {
            widths.push(0.0);
            continue;
        }
        let mut totals = vec![0.0f64; k];
        for j in 0..n {
            if j != i {
                totals[assignment[j]] += dist.get(i, j);
            }
        }
        let a = totals[own] / (sizes[own] - 1) as f64;
        let mut b = f64::INFINITY;
        for cluster in 0..k {
            if cluster != own && sizes[cluster] > 0 {
                b = b.min(totals[cluster] / sizes[cluster] as f64);
            }
        }
        let denom = a.max(b);
        widths.push(if denom > 0.0 { (b - a) / denom } else { 0.0 });
    }
    widths
}

pub fn mean_silhouette(widths: &[f64]) -> f64 {
    crate::stats::describe::mean(widths)
}
