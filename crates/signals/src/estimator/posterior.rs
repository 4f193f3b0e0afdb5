use lotto_stats_core::{AnalysisConfig, DrawRecord, FrequencyTable, RecordOrder};

use super::dirichlet::dirichlet_posterior;
use super::frequency::{count_by_day, count_by_month, count_outcomes};
use super::fusion::ComponentDistributions;
use super::markov::MarkovModel;
use super::shrinkage::shrink;

/// Calendar key the day and month views are conditioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditioningKey {
    pub day: u32,
    pub month: u32,
}

/// Everything computed for one prediction: the raw tables, the fitted Markov
/// model and the four component distributions.
#[derive(Debug, Clone)]
pub struct PosteriorViews {
    pub global_counts: FrequencyTable,
    pub day_counts: FrequencyTable,
    pub month_counts: FrequencyTable,
    pub markov: MarkovModel,
    pub components: ComponentDistributions,
}

/// Builds the global, day, month and Markov views from `training`.
///
/// `order` describes how `training` is stored; only the Markov fit depends
/// on it. Day and month tables are Dirichlet-smoothed and then shrunk toward
/// the global posterior by their own sample size.
#[must_use]
pub fn build_components(
    training: &[DrawRecord],
    order: RecordOrder,
    config: &AnalysisConfig,
    key: ConditioningKey,
) -> PosteriorViews {
    let global_counts = count_outcomes(training);
    let day_counts = count_by_day(training, key.day);
    let month_counts = count_by_month(training, key.month);

    let global = dirichlet_posterior(&global_counts, config.alpha);
    let day = shrink(
        &dirichlet_posterior(&day_counts, config.alpha),
        &global,
        day_counts.total(),
        config.k,
    );
    let month = shrink(
        &dirichlet_posterior(&month_counts, config.alpha),
        &global,
        month_counts.total(),
        config.k,
    );

    let markov = MarkovModel::fit(training, order, config.epsilon);
    let markov_view = markov.predictive();

    tracing::trace!(
        n = global_counts.total(),
        n_day = day_counts.total(),
        n_month = month_counts.total(),
        day = key.day,
        month = key.month,
        "components built"
    );

    PosteriorViews {
        global_counts,
        day_counts,
        month_counts,
        markov,
        components: ComponentDistributions {
            global,
            day,
            month,
            markov: markov_view,
        },
    }
}
