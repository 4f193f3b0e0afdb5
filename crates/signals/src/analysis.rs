//! Single analysis: the fused posterior for the upcoming draw plus the
//! uniformity test over the full history.

use lotto_stats_core::{
    AnalysisConfig, Distribution, DrawRecord, EngineError, Outcome, RankedOutcome, RecordOrder,
};
use serde::Serialize;

use crate::estimator::{build_components, ComponentDistributions, ConditioningKey};
use crate::validation::{test_uniformity, SignificantOutcome};

/// Month used when neither the config nor the history supplies one.
const FALLBACK_MONTH: u32 = 1;

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Usable records counted.
    pub n: usize,
    /// Outcome of the latest usable draw, which keys the Markov view.
    pub most_recent_outcome: Option<Outcome>,
    pub target_day: u32,
    pub target_month: u32,
    /// All 100 outcomes, most probable first.
    pub ranked: Vec<RankedOutcome>,
    /// The first `config.top` entries of `ranked`.
    pub top: Vec<RankedOutcome>,
    pub raw_counts: Vec<u64>,
    pub z_scores: Vec<f64>,
    pub p_values: Vec<f64>,
    pub significance_flags: Vec<bool>,
    /// Flagged outcomes, strongest deviation first.
    pub significant: Vec<SignificantOutcome>,
    pub components: ComponentDistributions,
    pub fused: Distribution,
}

impl AnalysisReport {
    /// The rank-1 pick.
    #[must_use]
    pub fn best(&self) -> Option<&RankedOutcome> {
        self.ranked.first()
    }
}

/// Runs the full estimator over a newest-first history.
///
/// # Errors
/// Returns [`EngineError::InvalidConfig`] when `config` fails validation.
pub fn analyze(records: &[DrawRecord], config: &AnalysisConfig) -> Result<AnalysisReport, EngineError> {
    config.validate()?;

    let latest = records.iter().find(|r| r.is_usable());
    let target_month = config
        .target_month
        .or_else(|| latest.map(|r| r.month))
        .unwrap_or(FALLBACK_MONTH);
    let key = ConditioningKey {
        day: config.target_day,
        month: target_month,
    };

    let views = build_components(records, RecordOrder::NewestFirst, config, key);
    let fused = views.components.fuse(&config.weights);
    let ranked = fused.ranked();
    let top = ranked.iter().take(config.top).copied().collect();

    let uniformity = test_uniformity(&views.global_counts, config.fdr);
    let significant = uniformity.flagged(&views.global_counts);

    let report = AnalysisReport {
        n: views.global_counts.total(),
        most_recent_outcome: views.markov.most_recent(),
        target_day: config.target_day,
        target_month,
        top,
        raw_counts: views.global_counts.counts().to_vec(),
        z_scores: uniformity.z_scores,
        p_values: uniformity.p_values,
        significance_flags: uniformity.significant,
        significant,
        components: views.components,
        ranked,
        fused,
    };

    tracing::info!(
        n = report.n,
        target_day = report.target_day,
        target_month = report.target_month,
        flagged = report.significant.len(),
        best = ?report.best().map(|r| r.outcome.value()),
        "analysis complete"
    );
    Ok(report)
}
