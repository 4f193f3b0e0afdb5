use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use lotto_stats_backtest::{run_backtest, BacktestReport};
use lotto_stats_core::{AnalysisConfig, AppConfig, FusionWeights, Outcome, RankedOutcome, TicketConfig};
use lotto_stats_data::HistoryStore;
use lotto_stats_signals::{analyze, SignificantOutcome};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ApiError;

const NOTE: &str = "Lottery expected value is negative; for study only.";

/// Shared, read-only request context.
#[derive(Debug, Clone)]
pub struct AppState {
    pub history_path: PathBuf,
    /// Engine settings that query parameters override.
    pub engine: AnalysisConfig,
    pub ticket: TicketConfig,
}

impl AppState {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            history_path: PathBuf::from(&config.data.history_path),
            engine: config.engine.clone(),
            ticket: config.ticket,
        }
    }
}

/// Query overrides accepted by the analysis endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineQuery {
    pub target_day: Option<u32>,
    pub target_month: Option<u32>,
    /// Comma-separated `global,day,month,markov`.
    pub weights: Option<String>,
    pub alpha: Option<f64>,
    pub k: Option<f64>,
    pub epsilon: Option<f64>,
    pub top: Option<usize>,
    pub bt_last: Option<usize>,
    pub bt_top: Option<usize>,
}

impl EngineQuery {
    /// Applies the overrides to `base`; validation happens in the engine.
    ///
    /// # Errors
    /// Returns `ApiError::BadRequest` if `weights` does not parse.
    pub fn apply(&self, base: &AnalysisConfig) -> Result<AnalysisConfig, ApiError> {
        let mut config = base.clone();
        if let Some(weights) = &self.weights {
            config.weights = weights
                .parse::<FusionWeights>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        }
        if let Some(day) = self.target_day {
            config.target_day = day;
        }
        if self.target_month.is_some() {
            config.target_month = self.target_month;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        if let Some(bt_last) = self.bt_last {
            config.bt_last = bt_last;
        }
        if let Some(bt_top) = self.bt_top {
            config.bt_top = bt_top;
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub ok: bool,
    pub n: usize,
    pub most_recent_prev: Option<Outcome>,
    pub target_day: u32,
    pub target_month: u32,
    pub top: Vec<RankedOutcome>,
    /// All 100 outcomes, most probable first.
    pub dist: Vec<RankedOutcome>,
    pub significant: Vec<SignificantOutcome>,
    /// Expected value of one ticket on the rank-1 pick.
    pub best_expected_value: Option<f64>,
    pub note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BacktestResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub report: BacktestReport,
}

/// Returns the number of raw entries in the history file.
pub async fn history_count(State(state): State<Arc<AppState>>) -> Json<CountResponse> {
    let path = state.history_path.clone();
    let count = tokio::task::spawn_blocking(move || HistoryStore::count_at(path))
        .await
        .unwrap_or(0);
    Json(CountResponse { count })
}

/// Analyses the full history for the upcoming draw.
///
/// # Errors
/// Returns 400 for malformed parameters, 404 when the history file is
/// missing.
pub async fn summary(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EngineQuery>, QueryRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let config = query.apply(&state.engine)?;
    let ticket = state.ticket;
    let path = state.history_path.clone();

    let report = tokio::task::spawn_blocking(move || {
        let records = HistoryStore::open(path)?.records();
        analyze(&records, &config).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(SummaryResponse {
        ok: true,
        n: report.n,
        most_recent_prev: report.most_recent_outcome,
        target_day: report.target_day,
        target_month: report.target_month,
        best_expected_value: report.best().map(|b| ticket.expected_value(b.probability)),
        top: report.top,
        dist: report.ranked,
        significant: report.significant,
        note: NOTE,
    }))
}

/// Runs the walk-forward backtest over the full history.
///
/// # Errors
/// Returns 400 for malformed parameters, 404 when the history file is
/// missing, or 422 when there is too little history.
pub async fn backtest(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EngineQuery>, QueryRejection>,
) -> Result<Json<BacktestResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let config = query.apply(&state.engine)?;
    let path = state.history_path.clone();

    let report = tokio::task::spawn_blocking(move || {
        let records = HistoryStore::open(path)?.records();
        run_backtest(&records, &config).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(BacktestResponse { ok: true, report }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_keeps_base_config() {
        let base = AnalysisConfig::default();
        let config = EngineQuery::default().apply(&base).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn query_overrides_fields() {
        let query = EngineQuery {
            target_day: Some(1),
            weights: Some("1,1,1,0".to_string()),
            alpha: Some(2.0),
            bt_last: Some(5),
            ..EngineQuery::default()
        };
        let config = query.apply(&AnalysisConfig::default()).unwrap();
        assert_eq!(config.target_day, 1);
        assert_eq!(config.weights, FusionWeights([1.0, 1.0, 1.0, 0.0]));
        assert!((config.alpha - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.bt_last, 5);
    }

    #[test]
    fn malformed_weights_are_rejected() {
        let query = EngineQuery {
            weights: Some("1,2".to_string()),
            ..EngineQuery::default()
        };
        assert!(matches!(
            query.apply(&AnalysisConfig::default()),
            Err(ApiError::BadRequest(_))
        ));
    }
}
