//! Dense 100-slot count and probability tables.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::cmp::Ordering;

use crate::outcome::{Outcome, OUTCOME_COUNT};

/// Occurrence counts per outcome plus the number of records counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; OUTCOME_COUNT],
    total: usize,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Creates an all-zero table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; OUTCOME_COUNT],
            total: 0,
        }
    }

    /// Builds a table from explicit counts; `total` is their sum.
    #[must_use]
    pub fn from_counts(counts: [u64; OUTCOME_COUNT]) -> Self {
        let total = counts.iter().sum::<u64>() as usize;
        Self { counts, total }
    }

    /// Records one occurrence of `outcome`.
    pub fn add(&mut self, outcome: Outcome) {
        self.counts[outcome.index()] += 1;
        self.total += 1;
    }

    /// Count for a single outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.counts[outcome.index()]
    }

    /// All counts indexed by outcome value.
    #[must_use]
    pub const fn counts(&self) -> &[u64; OUTCOME_COUNT] {
        &self.counts
    }

    /// Number of records counted (`N`).
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// True when nothing has been counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// A probability distribution over the 100 outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: [f64; OUTCOME_COUNT],
}

impl Distribution {
    /// The uniform distribution, 1/100 per outcome.
    #[must_use]
    pub fn uniform() -> Self {
        Self {
            probs: [1.0 / OUTCOME_COUNT as f64; OUTCOME_COUNT],
        }
    }

    /// Wraps probabilities that already sum to one.
    ///
    /// Callers are the estimators in this workspace, each of which normalises
    /// by construction; the invariant is only checked in debug builds.
    #[must_use]
    pub fn from_probabilities(probs: [f64; OUTCOME_COUNT]) -> Self {
        debug_assert!(
            probs.iter().all(|p| p.is_finite() && *p >= 0.0),
            "probabilities must be finite and non-negative"
        );
        Self { probs }
    }

    /// Probability of a single outcome.
    #[must_use]
    pub fn prob(&self, outcome: Outcome) -> f64 {
        self.probs[outcome.index()]
    }

    /// All probabilities indexed by outcome value.
    #[must_use]
    pub const fn probabilities(&self) -> &[f64; OUTCOME_COUNT] {
        &self.probs
    }

    /// Sum of all probabilities (1 within floating tolerance).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Outcomes ranked by descending probability, ties by ascending value.
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedOutcome> {
        let mut ranked: Vec<RankedOutcome> = Outcome::all()
            .map(|outcome| RankedOutcome {
                outcome,
                probability: self.probs[outcome.index()],
            })
            .collect();
        // Stable sort keeps ascending outcome order among equal probabilities.
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    /// The most probable outcome (lowest value on ties).
    #[must_use]
    pub fn argmax(&self) -> RankedOutcome {
        let mut best = RankedOutcome {
            outcome: Outcome::from_index(0),
            probability: self.probs[0],
        };
        for outcome in Outcome::all().skip(1) {
            let p = self.probs[outcome.index()];
            if p > best.probability {
                best = RankedOutcome {
                    outcome,
                    probability: p,
                };
            }
        }
        best
    }

    /// 1-based rank of `outcome` under [`Distribution::ranked`] ordering.
    #[must_use]
    pub fn rank_of(&self, outcome: Outcome) -> usize {
        let p = self.prob(outcome);
        let ahead = Outcome::all()
            .filter(|other| {
                let q = self.probs[other.index()];
                q > p || (q == p && other.value() < outcome.value())
            })
            .count();
        ahead + 1
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.probs.iter())
    }
}

/// An outcome paired with its probability.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct RankedOutcome {
    /// The outcome.
    pub outcome: Outcome,
    /// Probability assigned to it.
    pub probability: f64,
}
