#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceKind {
    Euclidean,
    Manhattan,
}

impl DistanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceKind::Euclidean => "euclidean",
            DistanceKind::Manhattan => "manhattan",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_features(features: &[Vec<f64>], kind: DistanceKind) -> Self {
        let n = features.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(&features[i], &features[j], kind);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }
}

fn distance(a: &[f64], b: &[f64], kind: DistanceKind) -> f64 {
    match kind {
        DistanceKind::Euclidean => a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt(),
        DistanceKind::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
    }
}

#[derive(Debug, Clone)]
pub struct PamResult {
    pub medoids: Vec<usize>,
    pub assignment: Vec<usize>,
    pub total_cost: f64,
}

const SWAP_TOLERANCE: f64 = 1e-12;

// Greedy BUILD then best-improving SWAP until a local optimum. All ties break
// toward the lower point index, so the result is deterministic.
pub fn pam(dist: &DistanceMatrix, k: usize) -> PamResult {
    debug_assert!(k >= 1 && k <= dist.len());
    let mut medoids = build_medoids(dist, k);
    let mut current_cost = cost_of(dist, &medoids);

    loop {
        let mut best: Option<(f64, usize, usize)> = None;
        for slot in 0..medoids.len() {
            let saved = medoids[slot];
            for candidate in 0..dist.len() {
                if medoids.contains(&candidate) {
                    continue;
                }
                medoids[slot] = candidate;
                let cost = cost_of(dist, &medoids);
                if cost < best.map_or(current_cost - SWAP_TOLERANCE, |(c, _, _)| c) {
                    best = Some((cost, slot, candidate));
                }
            }
            medoids[slot] = saved;
        }
        match best {
            Some((cost, slot, candidate)) => {
                medoids[slot] = candidate;
                current_cost = cost;
            }
            None => break,
        }
    }

    medoids.sort_unstable();
    let assignment = assign(dist, &medoids);
    PamResult {
        total_cost: cost_of(dist, &medoids),
        medoids,
        assignment,
    }
}

fn build_medoids(dist: &DistanceMatrix, k: usize) -> Vec<usize> {
    let n = dist.len();
    let mut first = 0;
    let mut first_cost = f64::INFINITY;
    for i in 0..n {
        let total: f64 = (0..n).map(|j| dist.get(i, j)).sum();
        if total < first_cost {
            first = i;
            first_cost = total;
        }
    }

    let mut medoids = vec![first];
    let mut nearest: Vec<f64> = (0..n).map(|j| dist.get(first, j)).collect();
    while medoids.len() < k {
        let mut best = None;
        let mut best_cost = f64::INFINITY;
        for candidate in 0..n {
            if medoids.contains(&candidate) {
                continue;
            }
            let cost: f64 = (0..n)
                .map(|j| nearest[j].min(dist.get(candidate, j)))
                .sum();
            if cost < best_cost {
                best = Some(candidate);
                best_cost = cost;
            }
        }
        let chosen = best.expect("fewer points than clusters");
        for j in 0..n {
            nearest[j] = nearest[j].min(dist.get(chosen, j));
        }
        medoids.push(chosen);
    }
    medoids
}

fn cost_of(dist: &DistanceMatrix, medoids: &[usize]) -> f64 {
    (0..dist.len())
        .map(|j| {
            medoids
                .iter()
                .map(|&m| dist.get(j, m))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

pub fn assign(dist: &DistanceMatrix, medoids: &[usize]) -> Vec<usize> {
    (0..dist.len())
        .map(|j| {
            let mut best = 0;
            let mut best_d = dist.get(j, medoids[0]);
            for (cluster, &m) in medoids.iter().enumerate().skip(1) {
                let d = dist.get(j, m);
                if d < best_d {
                    best = cluster;
                    best_d = d;
                }
            }
            best
        })
        .collect()
}
