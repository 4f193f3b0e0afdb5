//! Skill of a backtest relative to the uniform predictor.
//!
//! A predictor with no information hits top-1 with probability 1/100 and
//! top-K with probability K/100, and scores a mean NLL of ln(100). The
//! assessment reports how far the observed run sits from those baselines.

use lotto_stats_core::{binomial_test, wilson_ci, OUTCOME_COUNT};
use serde::{Deserialize, Serialize};

/// Floor applied to the true-outcome probability before taking `-ln`.
pub const NLL_FLOOR: f64 = 1e-12;

/// z for a two-sided 95% interval.
const Z_95: f64 = 1.96;

/// Backtest accuracy compared against random guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAssessment {
    /// Top-1 hit rate expected from uniform guessing.
    pub baseline_acc1: f64,
    /// Top-K hit rate expected from uniform guessing.
    pub baseline_acc_k: f64,
    /// Wilson score 95% CI for top-1 accuracy.
    pub acc1_ci: (f64, f64),
    /// Wilson score 95% CI for top-K accuracy.
    pub acc_k_ci: (f64, f64),
    /// p-value from binomial test (H0: top-1 rate = 1/100).
    pub acc1_p_value: f64,
    /// p-value from binomial test (H0: top-K rate = K/100).
    pub acc_k_p_value: f64,
    /// `ln(100) - meanNLL`; positive when the model beats uniform.
    pub nll_gain: f64,
}

impl SkillAssessment {
    /// Computes the assessment from hit counts over `n` cases.
    #[must_use]
    pub fn new(top1_hits: usize, top_k_hits: usize, n: usize, top_k: usize, mean_nll: f64) -> Self {
        let baseline_acc1 = 1.0 / OUTCOME_COUNT as f64;
        let baseline_acc_k = (top_k.min(OUTCOME_COUNT) as f64) / OUTCOME_COUNT as f64;

        Self {
            baseline_acc1,
            baseline_acc_k,
            acc1_ci: wilson_ci(top1_hits, n, Z_95),
            acc_k_ci: wilson_ci(top_k_hits, n, Z_95),
            acc1_p_value: binomial_test(top1_hits, n, baseline_acc1),
            acc_k_p_value: binomial_test(top_k_hits, n, baseline_acc_k),
            nll_gain: (OUTCOME_COUNT as f64).ln() - mean_nll,
        }
    }

    /// True when top-1 accuracy is above the baseline at the 5% level.
    #[must_use]
    pub fn beats_baseline(&self) -> bool {
        self.acc1_ci.0 > self.baseline_acc1 && self.acc1_p_value < 0.05
    }
}
