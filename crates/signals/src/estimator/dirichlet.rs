//! Dirichlet-multinomial posterior mean (additive smoothing).

use lotto_stats_core::{Distribution, FrequencyTable, OUTCOME_COUNT};

/// Converts counts into `p[i] = (count[i] + alpha) / (N + 100 * alpha)`.
///
/// With `alpha > 0` every outcome gets strictly positive mass, which the
/// log-linear fusion relies on. `alpha = 0` is the maximum-likelihood
/// estimate. An empty table yields the uniform distribution for any `alpha`,
/// as does an `alpha` so large the denominator overflows (the limit as
/// `alpha` grows).
#[must_use]
pub fn dirichlet_posterior(table: &FrequencyTable, alpha: f64) -> Distribution {
    if table.is_empty() {
        return Distribution::uniform();
    }

    let denominator = table.total() as f64 + OUTCOME_COUNT as f64 * alpha;
    if !denominator.is_finite() {
        return Distribution::uniform();
    }
    let mut probs = [0.0; OUTCOME_COUNT];
    for (p, &count) in probs.iter_mut().zip(table.counts()) {
        *p = (count as f64 + alpha) / denominator;
    }
    Distribution::from_probabilities(probs)
}
