//! Expanding-window walk-forward evaluation of the fused posterior.
//!
//! For each of the last `L` draws the estimator is rebuilt from strictly
//! earlier draws only, conditioned on the held-out draw's own day and month,
//! and scored against its true outcome.
//!
//! # Walk-Forward Process
//!
//! 1. Order usable records oldest first; `T` = count
//! 2. `L = min(bt_last, T - 2)`; fail when `L <= 0`
//! 3. For `t` in `T-L..T`: train on `[0, t)`, predict draw `t`
//! 4. Aggregate hit rates, NLL and assigned probabilities

use lotto_stats_core::{AnalysisConfig, DrawRecord, EngineError, Outcome, RecordOrder};
use lotto_stats_signals::{build_components, ConditioningKey};
use serde::Serialize;
use tracing::{debug, info};

use crate::metrics::{SkillAssessment, NLL_FLOOR};

/// Two training draws plus one draw to evaluate.
pub const MIN_RECORDS: usize = 3;

/// One held-out draw and what the model predicted for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestCase {
    pub id: String,
    #[serde(rename = "true")]
    pub true_outcome: Outcome,
    #[serde(rename = "top1")]
    pub top1_outcome: Outcome,
    pub top1_prob: f64,
    pub true_prob: f64,
    /// 1-based rank of the true outcome in the prediction.
    pub true_rank: usize,
    pub top1_hit: bool,
    pub top_k_hit: bool,
    /// Training draws available for this prediction.
    pub train_size: usize,
}

impl BacktestCase {
    /// Negative log-likelihood of the true outcome, floored away from zero.
    #[must_use]
    pub fn nll(&self) -> f64 {
        -self.true_prob.max(NLL_FLOOR).ln()
    }
}

/// Aggregate metrics plus every case, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestReport {
    /// Number of evaluated draws (`L`).
    pub n: usize,
    /// Rank cut-off used for `acc_k`.
    pub top_k: usize,
    pub acc1: f64,
    #[serde(rename = "accK")]
    pub acc_k: f64,
    #[serde(rename = "meanNLL")]
    pub mean_nll: f64,
    pub mean_true_p: f64,
    pub mean_top1_p: f64,
    pub per_case: Vec<BacktestCase>,
    pub skill: SkillAssessment,
}

impl BacktestReport {
    fn from_cases(per_case: Vec<BacktestCase>, top_k: usize) -> Self {
        let n = per_case.len();
        let n_f = n as f64;

        let top1_hits = per_case.iter().filter(|c| c.top1_hit).count();
        let top_k_hits = per_case.iter().filter(|c| c.top_k_hit).count();
        let mean_nll = per_case.iter().map(BacktestCase::nll).sum::<f64>() / n_f;
        let mean_true_p = per_case.iter().map(|c| c.true_prob).sum::<f64>() / n_f;
        let mean_top1_p = per_case.iter().map(|c| c.top1_prob).sum::<f64>() / n_f;

        Self {
            n,
            top_k,
            acc1: top1_hits as f64 / n_f,
            acc_k: top_k_hits as f64 / n_f,
            mean_nll,
            mean_true_p,
            mean_top1_p,
            skill: SkillAssessment::new(top1_hits, top_k_hits, n, top_k, mean_nll),
            per_case,
        }
    }

    /// The most recent `count` cases.
    #[must_use]
    pub fn last_cases(&self, count: usize) -> &[BacktestCase] {
        &self.per_case[self.per_case.len().saturating_sub(count)..]
    }
}

/// Runs the walk-forward backtest over a newest-first history.
///
/// Records without an outcome are ignored. The result depends only on the
/// inputs, so repeated runs return equal reports.
///
/// # Errors
/// Returns [`EngineError::InvalidConfig`] when `config` fails validation, or
/// [`EngineError::InsufficientData`] when fewer than [`MIN_RECORDS`] usable
/// draws are supplied.
pub fn run_backtest(
    records: &[DrawRecord],
    config: &AnalysisConfig,
) -> Result<BacktestReport, EngineError> {
    config.validate()?;

    let rows: Vec<&DrawRecord> = records.iter().rev().filter(|r| r.is_usable()).collect();
    let total = rows.len();
    let window = config.bt_last.min(total.saturating_sub(2));
    if window == 0 {
        return Err(EngineError::InsufficientData {
            required: MIN_RECORDS,
            available: total,
        });
    }

    // Owned oldest-first copy so each training prefix is a contiguous slice.
    let chronological: Vec<DrawRecord> = rows.into_iter().cloned().collect();
    let start = total - window;

    let mut per_case = Vec::with_capacity(window);
    for t in start..total {
        let target = &chronological[t];
        let Some(true_outcome) = target.outcome else {
            continue;
        };
        per_case.push(evaluate(&chronological[..t], target, true_outcome, config));
    }

    let report = BacktestReport::from_cases(per_case, config.bt_top);
    info!(
        n = report.n,
        top_k = report.top_k,
        acc1 = report.acc1,
        acc_k = report.acc_k,
        mean_nll = report.mean_nll,
        "backtest complete"
    );
    Ok(report)
}

fn evaluate(
    training: &[DrawRecord],
    target: &DrawRecord,
    true_outcome: Outcome,
    config: &AnalysisConfig,
) -> BacktestCase {
    let key = ConditioningKey {
        day: target.day,
        month: target.month,
    };
    let views = build_components(training, RecordOrder::OldestFirst, config, key);
    let predicted = views.components.fuse(&config.weights);

    let top1 = predicted.argmax();
    let true_prob = predicted.prob(true_outcome);
    let true_rank = predicted.rank_of(true_outcome);

    let case = BacktestCase {
        id: target.id.clone(),
        true_outcome,
        top1_outcome: top1.outcome,
        top1_prob: top1.probability,
        true_prob,
        true_rank,
        top1_hit: true_rank == 1,
        top_k_hit: true_rank <= config.bt_top,
        train_size: training.len(),
    };
    debug!(
        id = %case.id,
        truth = %true_outcome,
        top1 = %case.top1_outcome,
        rank = case.true_rank,
        "backtest step"
    );
    case
}

// =============================================================================
// Tests
// =============================================================================
