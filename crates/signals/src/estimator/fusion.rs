//! Log-linear (weighted geometric) fusion of component distributions.
//!
//! `score[d] = sum_i w_i * ln(max(p_i[d], floor))`, then a max-shifted
//! softmax. Weights act as exponents on each source, so a component that
//! assigns near-zero mass to an outcome suppresses it far more than a
//! weighted arithmetic average would.

use lotto_stats_core::{Distribution, FusionWeights, OUTCOME_COUNT};
use serde::Serialize;

/// Floor applied before taking logarithms.
pub const PROBABILITY_FLOOR: f64 = 1e-12;

/// The four views fused into the final posterior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDistributions {
    /// Dirichlet posterior over the full history.
    pub global: Distribution,
    /// Day-of-month view shrunk toward `global`.
    pub day: Distribution,
    /// Month view shrunk toward `global`.
    pub month: Distribution,
    /// Markov row for the most recent outcome.
    pub markov: Distribution,
}

impl ComponentDistributions {
    /// Fuses the four views with `weights` `[global, day, month, markov]`.
    #[must_use]
    pub fn fuse(&self, weights: &FusionWeights) -> Distribution {
        log_linear_fusion(&[
            (weights.global(), &self.global),
            (weights.day(), &self.day),
            (weights.month(), &self.month),
            (weights.markov(), &self.markov),
        ])
    }
}

/// Weighted log-probability sum followed by a numerically stable softmax.
///
/// An empty component list yields the uniform distribution.
#[must_use]
pub fn log_linear_fusion(components: &[(f64, &Distribution)]) -> Distribution {
    let mut scores = [0.0; OUTCOME_COUNT];
    for (weight, dist) in components {
        for (score, &p) in scores.iter_mut().zip(dist.probabilities()) {
            *score += weight * p.max(PROBABILITY_FLOOR).ln();
        }
    }
    softmax(&scores)
}

/// Softmax with the maximum subtracted before exponentiation.
///
/// Scores that overflowed to an infinity or NaN carry no usable ordering,
/// so the result is uniform.
#[must_use]
pub fn softmax(scores: &[f64; OUTCOME_COUNT]) -> Distribution {
    if !scores.iter().all(|s| s.is_finite()) {
        return Distribution::uniform();
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut probs = [0.0; OUTCOME_COUNT];
    for (p, &s) in probs.iter_mut().zip(scores) {
        *p = (s - max).exp();
    }

    // The maximum contributes exp(0) = 1, so the sum is at least 1.
    let sum: f64 = probs.iter().sum();
    for p in &mut probs {
        *p /= sum;
    }
    Distribution::from_probabilities(probs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_stats_core::Outcome;

    fn peaked(at: usize, mass: f64) -> Distribution {
        let rest = (1.0 - mass) / (OUTCOME_COUNT as f64 - 1.0);
        let mut probs = [rest; OUTCOME_COUNT];
        probs[at] = mass;
        Distribution::from_probabilities(probs)
    }

    fn all_uniform() -> ComponentDistributions {
        ComponentDistributions {
            global: Distribution::uniform(),
            day: Distribution::uniform(),
            month: Distribution::uniform(),
            markov: Distribution::uniform(),
        }
    }

    #[test]
    fn uniform_inputs_fuse_to_uniform_for_any_weights() {
        let components = all_uniform();
        for weights in [
            FusionWeights([0.5, 1.0, 0.5, 1.0]),
            FusionWeights([0.0, 0.0, 0.0, 0.0]),
            FusionWeights([3.0, -1.0, 7.5, 0.1]),
        ] {
            let fused = components.fuse(&weights);
            for outcome in Outcome::all() {
                assert!(
                    (fused.prob(outcome) - 0.01).abs() < 1e-12,
                    "weights {weights}: p({outcome}) = {}",
                    fused.prob(outcome)
                );
            }
        }
    }

    #[test]
    fn fused_output_is_normalised() {
        let components = ComponentDistributions {
            global: peaked(3, 0.2),
            day: peaked(7, 0.6),
            month: Distribution::uniform(),
            markov: peaked(42, 0.3),
        };
        let fused = components.fuse(&FusionWeights::default());
        assert!((fused.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_component_with_unit_weight_is_identity() {
        let source = peaked(11, 0.4);
        let fused = log_linear_fusion(&[(1.0, &source)]);
        for outcome in Outcome::all() {
            assert!((fused.prob(outcome) - source.prob(outcome)).abs() < 1e-12);
        }
    }

    #[test]
    fn overflowing_weights_fall_back_to_uniform() {
        let source = Distribution::uniform();
        for weight in [1e308, -1e308] {
            let fused = log_linear_fusion(&[(weight, &source)]);
            assert_eq!(fused, Distribution::uniform(), "weight {weight}");
        }
    }

    #[test]
    fn non_finite_scores_soften_to_uniform() {
        let mut scores = [0.0; OUTCOME_COUNT];
        scores[3] = f64::INFINITY;
        scores[4] = f64::NEG_INFINITY;
        assert_eq!(softmax(&scores), Distribution::uniform());
    }

    #[test]
    fn fusion_is_geometric_not_arithmetic() {
        // Two sources disagree; outcome 5 is near-impossible under `b`.
        let mut a = [0.0; OUTCOME_COUNT];
        let mut b = [0.0; OUTCOME_COUNT];
        a[5] = 0.5;
        a[6] = 0.5;
        b[5] = 1e-9;
        b[6] = 1.0 - 1e-9;
        let a = Distribution::from_probabilities(a);
        let b = Distribution::from_probabilities(b);

        let fused = log_linear_fusion(&[(1.0, &a), (1.0, &b)]);
        // An arithmetic average would give outcome 5 about 0.25.
        assert!(fused.prob(Outcome::from_index(5)) < 1e-6);
        assert!(fused.prob(Outcome::from_index(6)) > 0.999);
    }

    #[test]
    fn zero_probabilities_are_floored() {
        let mut probs = [0.0; OUTCOME_COUNT];
        probs[0] = 1.0;
        let point = Distribution::from_probabilities(probs);
        let fused = log_linear_fusion(&[(1.0, &point)]);
        assert!(fused.probabilities().iter().all(|p| p.is_finite()));
        assert!((fused.total() - 1.0).abs() < 1e-12);
        assert!(fused.prob(Outcome::from_index(1)) > 0.0);
    }

    #[test]
    fn softmax_survives_large_scores() {
        let mut scores = [1000.0; OUTCOME_COUNT];
        scores[9] = 1010.0;
        let dist = softmax(&scores);
        assert!(dist.probabilities().iter().all(|p| p.is_finite()));
        assert_eq!(dist.argmax().outcome.value(), 9);
    }

    #[test]
    fn empty_component_list_is_uniform() {
        assert_eq!(log_linear_fusion(&[]), Distribution::uniform());
    }
}
