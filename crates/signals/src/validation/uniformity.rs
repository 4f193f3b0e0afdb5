//! Per-outcome z-tests of observed counts against the uniform rate.

use lotto_stats_core::{two_sided_p_value, FrequencyTable, Outcome, OUTCOME_COUNT};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::fdr::benjamini_hochberg;

/// Null-hypothesis probability of each outcome.
pub const UNIFORM_PROBABILITY: f64 = 1.0 / OUTCOME_COUNT as f64;

/// Result of testing every outcome's frequency against the uniform null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformityTest {
    /// Records counted (`N`).
    pub sample_size: usize,
    /// False-discovery rate used for the correction.
    pub fdr: f64,
    /// `(count - N/100) / sigma`, indexed by outcome.
    pub z_scores: Vec<f64>,
    /// Two-sided p-values, indexed by outcome.
    pub p_values: Vec<f64>,
    /// Benjamini-Hochberg rejections, indexed by outcome.
    pub significant: Vec<bool>,
}

/// A flagged outcome with its evidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantOutcome {
    pub outcome: Outcome,
    pub count: u64,
    pub z_score: f64,
    pub p_value: f64,
}

impl UniformityTest {
    /// Flagged outcomes ordered by descending `|z|`.
    #[must_use]
    pub fn flagged(&self, table: &FrequencyTable) -> Vec<SignificantOutcome> {
        let mut flagged: Vec<SignificantOutcome> = Outcome::all()
            .filter(|o| self.significant[o.index()])
            .map(|o| SignificantOutcome {
                outcome: o,
                count: table.count(o),
                z_score: self.z_scores[o.index()],
                p_value: self.p_values[o.index()],
            })
            .collect();
        flagged.sort_by(|a, b| {
            b.z_score
                .abs()
                .partial_cmp(&a.z_score.abs())
                .unwrap_or(Ordering::Equal)
        });
        flagged
    }

    /// Number of outcomes flagged.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.significant.iter().filter(|&&s| s).count()
    }
}

/// Tests each outcome's count against `N/100` and applies BH at `fdr`.
///
/// `sigma = sqrt(N * 0.01 * 0.99)`, floored to 1 when zero so an empty
/// table produces `z = 0` and `p = 1` everywhere.
#[must_use]
pub fn test_uniformity(table: &FrequencyTable, fdr: f64) -> UniformityTest {
    let n = table.total() as f64;
    let mu = n * UNIFORM_PROBABILITY;
    let sigma = (n * UNIFORM_PROBABILITY * (1.0 - UNIFORM_PROBABILITY)).sqrt();
    let sigma = if sigma > 0.0 { sigma } else { 1.0 };

    let z_scores: Vec<f64> = table
        .counts()
        .iter()
        .map(|&count| (count as f64 - mu) / sigma)
        .collect();
    let p_values: Vec<f64> = z_scores.iter().map(|&z| two_sided_p_value(z)).collect();
    let significant = benjamini_hochberg(&p_values, fdr);

    let test = UniformityTest {
        sample_size: table.total(),
        fdr,
        z_scores,
        p_values,
        significant,
    };
    tracing::debug!(
        n = test.sample_size,
        rejections = test.rejections(),
        fdr,
        "uniformity test complete"
    );
    test
}
