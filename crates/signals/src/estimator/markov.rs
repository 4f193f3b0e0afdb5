//! First-order Markov transition model over consecutive draws.
//!
//! Transitions always run from the chronologically earlier draw to the
//! chronologically later one, whatever order the input slice is stored in.

use lotto_stats_core::{Distribution, DrawRecord, Outcome, RecordOrder, OUTCOME_COUNT};

/// Dense 100x100 transition counts; cell `[a][b]` counts `a` followed by `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionMatrix {
    counts: Vec<u32>,
    row_totals: [u64; OUTCOME_COUNT],
}

impl Default for TransitionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionMatrix {
    /// Creates an all-zero matrix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: vec![0; OUTCOME_COUNT * OUTCOME_COUNT],
            row_totals: [0; OUTCOME_COUNT],
        }
    }

    /// Counts `previous` being immediately followed by `next`.
    pub fn record(&mut self, previous: Outcome, next: Outcome) {
        self.counts[previous.index() * OUTCOME_COUNT + next.index()] += 1;
        self.row_totals[previous.index()] += 1;
    }

    #[must_use]
    pub fn count(&self, previous: Outcome, next: Outcome) -> u32 {
        self.counts[previous.index() * OUTCOME_COUNT + next.index()]
    }

    /// Number of observed transitions out of `previous`.
    #[must_use]
    pub fn row_total(&self, previous: Outcome) -> u64 {
        self.row_totals[previous.index()]
    }

    /// Total number of transitions recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.row_totals.iter().sum()
    }

    /// Smoothed conditional distribution of the next outcome given `previous`:
    /// `(trans[a][b] + epsilon) / (rowSum[a] + 100 * epsilon)`.
    ///
    /// A row with no observations and `epsilon = 0` has no defined estimate
    /// and falls back to uniform, as does an `epsilon` large enough to
    /// overflow the denominator.
    #[must_use]
    pub fn row_distribution(&self, previous: Outcome, epsilon: f64) -> Distribution {
        let row_sum = self.row_total(previous) as f64;
        let denominator = row_sum + OUTCOME_COUNT as f64 * epsilon;
        if denominator <= 0.0 || !denominator.is_finite() {
            return Distribution::uniform();
        }

        let start = previous.index() * OUTCOME_COUNT;
        let row = &self.counts[start..start + OUTCOME_COUNT];
        let mut probs = [0.0; OUTCOME_COUNT];
        for (p, &count) in probs.iter_mut().zip(row) {
            *p = (f64::from(count) + epsilon) / denominator;
        }
        Distribution::from_probabilities(probs)
    }

    /// All 100 smoothed rows, indexed by the previous outcome.
    #[must_use]
    pub fn smoothed(&self, epsilon: f64) -> Vec<Distribution> {
        Outcome::all()
            .map(|previous| self.row_distribution(previous, epsilon))
            .collect()
    }
}

/// Transition statistics plus the most recent observed outcome.
#[derive(Debug, Clone)]
pub struct MarkovModel {
    transitions: TransitionMatrix,
    epsilon: f64,
    most_recent: Option<Outcome>,
}

impl MarkovModel {
    /// Builds the model from a record slice stored in `order`.
    ///
    /// Records without an outcome are skipped, so adjacency is between
    /// consecutive usable draws.
    #[must_use]
    pub fn fit(records: &[DrawRecord], order: RecordOrder, epsilon: f64) -> Self {
        let outcomes = records.iter().filter_map(|r| r.outcome);
        match order {
            RecordOrder::OldestFirst => Self::fit_chronological(outcomes, epsilon),
            RecordOrder::NewestFirst => Self::fit_chronological(outcomes.rev(), epsilon),
        }
    }

    /// Builds the model from outcomes in chronological order (oldest first).
    #[must_use]
    pub fn fit_chronological<I>(outcomes: I, epsilon: f64) -> Self
    where
        I: IntoIterator<Item = Outcome>,
    {
        let mut transitions = TransitionMatrix::new();
        let mut previous: Option<Outcome> = None;

        for next in outcomes {
            if let Some(prev) = previous {
                transitions.record(prev, next);
            }
            previous = Some(next);
        }

        Self {
            transitions,
            epsilon,
            most_recent: previous,
        }
    }

    /// The latest outcome in the fitted history, if any.
    #[must_use]
    pub const fn most_recent(&self) -> Option<Outcome> {
        self.most_recent
    }

    #[must_use]
    pub const fn transitions(&self) -> &TransitionMatrix {
        &self.transitions
    }

    /// Smoothed distribution of the next outcome given `previous`.
    #[must_use]
    pub fn row(&self, previous: Outcome) -> Distribution {
        self.transitions.row_distribution(previous, self.epsilon)
    }

    /// Conditional distribution for the upcoming draw, keyed by the most
    /// recent outcome; uniform when the history is empty.
    #[must_use]
    pub fn predictive(&self) -> Distribution {
        match self.most_recent {
            Some(previous) => self.row(previous),
            None => Distribution::uniform(),
        }
    }
}
