//! Sample-size shrinkage of a conditional view toward the global view.

use lotto_stats_core::{Distribution, OUTCOME_COUNT};

/// Trust placed in a conditional view built from `n_cond` observations:
/// `n_cond / (n_cond + k)`. Half trust is reached at `n_cond = k`.
#[must_use]
pub fn trust_weight(n_cond: usize, k: f64) -> f64 {
    let n = n_cond as f64;
    n / (n + k)
}

/// Returns `w * p_cond + (1 - w) * p_base` with `w = trust_weight(n_cond, k)`.
///
/// `n_cond = 0` returns `p_base` exactly.
#[must_use]
pub fn shrink(p_cond: &Distribution, p_base: &Distribution, n_cond: usize, k: f64) -> Distribution {
    if n_cond == 0 {
        return p_base.clone();
    }

    let w = trust_weight(n_cond, k);
    let mut probs = [0.0; OUTCOME_COUNT];
    for ((p, cond), base) in probs
        .iter_mut()
        .zip(p_cond.probabilities())
        .zip(p_base.probabilities())
    {
        *p = w * cond + (1.0 - w) * base;
    }
    Distribution::from_probabilities(probs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_stats_core::Outcome;

    fn point_mass(at: usize) -> Distribution {
        let mut probs = [0.0; OUTCOME_COUNT];
        probs[at] = 1.0;
        Distribution::from_probabilities(probs)
    }

    #[test]
    fn zero_samples_returns_base_exactly() {
        let base = point_mass(4);
        let cond = point_mass(9);
        assert_eq!(shrink(&cond, &base, 0, 50.0), base);
    }

    #[test]
    fn half_trust_at_k() {
        let blended = shrink(&point_mass(9), &point_mass(4), 50, 50.0);
        assert!((blended.prob(Outcome::from_index(9)) - 0.5).abs() < 1e-15);
        assert!((blended.prob(Outcome::from_index(4)) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn large_samples_converge_to_conditional() {
        let blended = shrink(&point_mass(9), &Distribution::uniform(), 1_000_000, 50.0);
        assert!(blended.prob(Outcome::from_index(9)) > 0.9999);
    }

    #[test]
    fn blend_preserves_normalisation() {
        let blended = shrink(&point_mass(1), &Distribution::uniform(), 17, 50.0);
        assert!((blended.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trust_weight_is_monotone() {
        let mut previous = trust_weight(0, 50.0);
        assert!(previous.abs() < f64::EPSILON);
        for n in [1, 10, 50, 500] {
            let w = trust_weight(n, 50.0);
            assert!(w > previous && w < 1.0);
            previous = w;
        }
    }
}
