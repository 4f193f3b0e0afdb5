use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Exponents applied to each component distribution during log-linear fusion,
/// in the order `[global, day, month, markov]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FusionWeights(pub [f64; 4]);

impl FusionWeights {
    #[must_use]
    pub const fn global(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub const fn day(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub const fn month(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub const fn markov(&self) -> f64 {
        self.0[3]
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self([0.5, 1.0, 0.5, 1.0])
    }
}

impl FromStr for FusionWeights {
    type Err = EngineError;

    /// Parses `"w0,w1,w2,w3"`. Any other arity or a non-numeric entry is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(EngineError::config(format!(
                "weights must have exactly 4 entries (global,day,month,markov), got {}",
                parts.len()
            )));
        }

        let mut weights = [0.0; 4];
        for (slot, part) in weights.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| EngineError::config(format!("weight {part:?} is not a number")))?;
        }
        Ok(Self(weights))
    }
}

impl fmt::Display for FusionWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a},{b},{c},{d}")
    }
}

/// Largest accepted magnitude of a fusion weight.
pub const MAX_FUSION_WEIGHT: f64 = 1e6;

/// Largest accepted `alpha`, `k` or `epsilon`.
pub const MAX_PRIOR_STRENGTH: f64 = 1e12;

/// Per-request estimator settings.
///
/// The engine keeps no configuration state of its own; every analysis or
/// backtest call receives one of these and validates it on entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dirichlet prior strength.
    pub alpha: f64,
    /// Sample size at which a conditional view earns half trust.
    pub k: f64,
    /// Markov transition prior strength.
    pub epsilon: f64,
    /// Fusion exponents `[global, day, month, markov]`.
    pub weights: FusionWeights,
    /// Day of month used to condition the day view.
    pub target_day: u32,
    /// Month used to condition the month view; defaults to the latest draw's month.
    pub target_month: Option<u32>,
    /// Number of most recent draws to evaluate in a backtest.
    pub bt_last: usize,
    /// Rank cut-off for the top-K backtest hit rate.
    pub bt_top: usize,
    /// False-discovery rate for Benjamini-Hochberg.
    pub fdr: f64,
    /// Number of ranked picks shown in summaries.
    pub top: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            k: 50.0,
            epsilon: 1.0,
            weights: FusionWeights::default(),
            target_day: 16,
            target_month: None,
            bt_last: 40,
            bt_top: 10,
            fdr: 0.10,
            top: 10,
        }
    }
}

impl AnalysisConfig {
    /// Checks every field against its domain.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=MAX_PRIOR_STRENGTH).contains(&self.alpha) {
            return Err(EngineError::config(format!(
                "alpha must be in [0, {MAX_PRIOR_STRENGTH:e}], got {}",
                self.alpha
            )));
        }
        if !(self.k > 0.0 && self.k <= MAX_PRIOR_STRENGTH) {
            return Err(EngineError::config(format!(
                "k must be in (0, {MAX_PRIOR_STRENGTH:e}], got {}",
                self.k
            )));
        }
        if !(0.0..=MAX_PRIOR_STRENGTH).contains(&self.epsilon) {
            return Err(EngineError::config(format!(
                "epsilon must be in [0, {MAX_PRIOR_STRENGTH:e}], got {}",
                self.epsilon
            )));
        }
        if let Some(w) = self
            .weights
            .0
            .iter()
            .find(|w| !w.is_finite() || w.abs() > MAX_FUSION_WEIGHT)
        {
            return Err(EngineError::config(format!(
                "weights must lie within +/-{MAX_FUSION_WEIGHT:e}, got {w}"
            )));
        }
        if !(1..=31).contains(&self.target_day) {
            return Err(EngineError::config(format!(
                "target_day must be in 1..=31, got {}",
                self.target_day
            )));
        }
        if let Some(month) = self.target_month {
            if !(1..=12).contains(&month) {
                return Err(EngineError::config(format!(
                    "target_month must be in 1..=12, got {month}"
                )));
            }
        }
        if self.bt_last == 0 {
            return Err(EngineError::config("bt_last must be > 0"));
        }
        if self.bt_top == 0 {
            return Err(EngineError::config("bt_top must be >= 1"));
        }
        if !(self.fdr > 0.0 && self.fdr <= 1.0) {
            return Err(EngineError::config(format!(
                "fdr must be in (0, 1], got {}",
                self.fdr
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the persisted `history.json`.
    pub history_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            history_path: "data/history.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5173,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ticket economics used to report the expected value of a pick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    pub price: f64,
    pub payout: f64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            price: 80.0,
            payout: 2000.0,
        }
    }
}

impl TicketConfig {
    /// Expected value of one ticket on an outcome with probability `p`.
    #[must_use]
    pub fn expected_value(&self, p: f64) -> f64 {
        self.payout * p - self.price
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub engine: AnalysisConfig,
    pub server: ServerConfig,
    pub ticket: TicketConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnalysisConfig::default();
        assert!((config.alpha - 0.5).abs() < f64::EPSILON);
        assert!((config.k - 50.0).abs() < f64::EPSILON);
        assert!((config.epsilon - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.weights.0, [0.5, 1.0, 0.5, 1.0]);
        assert_eq!(config.target_day, 16);
        assert_eq!(config.bt_last, 40);
        assert_eq!(config.bt_top, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn weights_parse_four_entries() {
        let weights: FusionWeights = "1, 0.5,0,2".parse().unwrap();
        assert_eq!(weights.0, [1.0, 0.5, 0.0, 2.0]);
        assert!((weights.markov() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weights_reject_wrong_arity() {
        assert!("1,2,3".parse::<FusionWeights>().is_err());
        assert!("1,2,3,4,5".parse::<FusionWeights>().is_err());
    }

    #[test]
    fn weights_reject_non_numeric() {
        let err = "1,two,3,4".parse::<FusionWeights>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn weights_display_round_trips() {
        let weights = FusionWeights([0.5, 1.0, 0.25, 2.0]);
        let parsed: FusionWeights = weights.to_string().parse().unwrap();
        assert_eq!(parsed, weights);
    }

    #[test]
    fn weights_deserialize_rejects_wrong_length() {
        assert!(serde_json::from_str::<FusionWeights>("[1.0, 2.0, 3.0]").is_err());
        assert!(serde_json::from_str::<FusionWeights>("[1.0, 2.0, 3.0, 4.0]").is_ok());
    }

    #[test]
    fn validate_rejects_out_of_domain_fields() {
        let bad = [
            AnalysisConfig { alpha: -0.1, ..AnalysisConfig::default() },
            AnalysisConfig { k: 0.0, ..AnalysisConfig::default() },
            AnalysisConfig { epsilon: f64::NAN, ..AnalysisConfig::default() },
            AnalysisConfig { weights: FusionWeights([1.0, f64::INFINITY, 1.0, 1.0]), ..AnalysisConfig::default() },
            AnalysisConfig { target_day: 0, ..AnalysisConfig::default() },
            AnalysisConfig { target_day: 32, ..AnalysisConfig::default() },
            AnalysisConfig { target_month: Some(13), ..AnalysisConfig::default() },
            AnalysisConfig { bt_last: 0, ..AnalysisConfig::default() },
            AnalysisConfig { bt_top: 0, ..AnalysisConfig::default() },
            AnalysisConfig { fdr: 0.0, ..AnalysisConfig::default() },
            AnalysisConfig { weights: FusionWeights([1e308, 1.0, 1.0, 1.0]), ..AnalysisConfig::default() },
            AnalysisConfig { weights: FusionWeights([1.0, 1.0, 1.0, -1e308]), ..AnalysisConfig::default() },
            AnalysisConfig { weights: FusionWeights([1.0, f64::NAN, 1.0, 1.0]), ..AnalysisConfig::default() },
            AnalysisConfig { alpha: 1e308, ..AnalysisConfig::default() },
            AnalysisConfig { epsilon: f64::INFINITY, ..AnalysisConfig::default() },
            AnalysisConfig { k: 1e300, ..AnalysisConfig::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "accepted {config:?}");
        }
    }

    #[test]
    fn validate_accepts_bounds_inclusive() {
        let config = AnalysisConfig {
            alpha: MAX_PRIOR_STRENGTH,
            k: MAX_PRIOR_STRENGTH,
            epsilon: MAX_PRIOR_STRENGTH,
            weights: FusionWeights([MAX_FUSION_WEIGHT, -MAX_FUSION_WEIGHT, 0.0, 1.0]),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_accepts_zero_priors() {
        let config = AnalysisConfig {
            alpha: 0.0,
            epsilon: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ticket_expected_value() {
        let ticket = TicketConfig::default();
        assert!((ticket.expected_value(0.01) - (-60.0)).abs() < 1e-9);
        assert!((ticket.expected_value(0.04) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.addr(), "127.0.0.1:8080");
    }
}
