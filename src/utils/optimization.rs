//! Derivative-free minimization for model parameter estimation.
//!
//! Nelder-Mead simplex search with optional box constraints. Used by the
//! autoregressive model to minimize its conditional sum of squares; the
//! standard reflection/expansion/contraction coefficients are fixed.

/// Configuration for [`minimize`].
#[derive(Debug, Clone)]
pub struct MinimizeConfig {
    /// Maximum number of simplex iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the objective spread across the simplex.
    pub tolerance: f64,
    /// Relative step used to seed the initial simplex.
    pub initial_step: f64,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

// Standard Nelder-Mead coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimize `objective` starting from `initial`, clamping every candidate
/// point to `bounds` when provided.
///
/// Returns the best point found; `initial` is returned unchanged when it is
/// empty.
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: MinimizeConfig,
) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return Vec::new();
    }

    let clamp = |point: Vec<f64>| -> Vec<f64> {
        match bounds {
            None => point,
            Some(b) => point
                .into_iter()
                .zip(b.iter())
                .map(|(x, &(lo, hi))| x.clamp(lo, hi))
                .collect(),
        }
    };

    // Seed the simplex: the initial point plus one perturbed vertex per axis.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(initial.to_vec());
    for i in 0..dim {
        let mut vertex = initial.to_vec();
        let step = if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        simplex.push(clamp(vertex));
    }
    let mut scores: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    for _ in 0..config.max_iter {
        // Order vertices best-to-worst.
        let mut order: Vec<usize> = (0..=dim).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let second_worst = order[dim - 1];
        let worst = order[dim];

        if scores[worst] - scores[best] < config.tolerance {
            break;
        }

        // Centroid of everything but the worst vertex.
        let mut centroid = vec![0.0; dim];
        for (i, vertex) in simplex.iter().enumerate() {
            if i != worst {
                for (c, &x) in centroid.iter_mut().zip(vertex.iter()) {
                    *c += x;
                }
            }
        }
        for c in &mut centroid {
            *c /= dim as f64;
        }

        let along = |from: &[f64], towards: &[f64], coeff: f64| -> Vec<f64> {
            clamp(
                from.iter()
                    .zip(towards.iter())
                    .map(|(&f, &t)| f + coeff * (t - f))
                    .collect(),
            )
        };

        let reflected = along(&centroid, &simplex[worst], -REFLECT);
        let reflected_score = objective(&reflected);

        if reflected_score < scores[best] {
            // Expansion.
            let expanded = along(&centroid, &reflected, EXPAND);
            let expanded_score = objective(&expanded);
            if expanded_score < reflected_score {
                simplex[worst] = expanded;
                scores[worst] = expanded_score;
            } else {
                simplex[worst] = reflected;
                scores[worst] = reflected_score;
            }
            continue;
        }

        if reflected_score < scores[second_worst] {
            simplex[worst] = reflected;
            scores[worst] = reflected_score;
            continue;
        }

        // Contraction towards the better of worst/reflected.
        let target = if reflected_score < scores[worst] {
            &reflected
        } else {
            &simplex[worst]
        };
        let contracted = along(&centroid, target, CONTRACT);
        let contracted_score = objective(&contracted);
        if contracted_score < scores[worst].min(reflected_score) {
            simplex[worst] = contracted;
            scores[worst] = contracted_score;
            continue;
        }

        // Shrink everything towards the best vertex.
        let anchor = simplex[best].clone();
        for i in 0..=dim {
            if i != best {
                simplex[i] = along(&anchor, &simplex[i], SHRINK);
                scores[i] = objective(&simplex[i]);
            }
        }
    }

    let best = scores
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);
    simplex.swap_remove(best)
}
