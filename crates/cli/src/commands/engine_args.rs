use clap::Args;
use lotto_stats_core::{AnalysisConfig, FusionWeights};

/// Estimator overrides shared by `analyze` and `backtest`.
///
/// Unset flags keep the value from the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Fusion weights as global,day,month,markov
    #[arg(long)]
    pub weights: Option<FusionWeights>,

    /// Dirichlet prior strength
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Shrinkage half-trust sample size
    #[arg(long)]
    pub k: Option<f64>,

    /// Markov transition prior strength
    #[arg(long)]
    pub epsilon: Option<f64>,
}

impl EngineArgs {
    /// Returns `base` with the given flags applied.
    #[must_use]
    pub fn apply(&self, base: &AnalysisConfig) -> AnalysisConfig {
        let mut config = base.clone();
        if let Some(weights) = self.weights {
            config.weights = weights;
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
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_keep_base() {
        let base = AnalysisConfig::default();
        assert_eq!(EngineArgs::default().apply(&base), base);
    }

    #[test]
    fn set_flags_override() {
        let args = EngineArgs {
            weights: Some(FusionWeights([1.0, 0.0, 0.0, 0.0])),
            k: Some(10.0),
            ..EngineArgs::default()
        };
        let config = args.apply(&AnalysisConfig::default());
        assert_eq!(config.weights.global(), 1.0);
        assert!((config.k - 10.0).abs() < f64::EPSILON);
        assert!((config.alpha - 0.5).abs() < f64::EPSILON);
    }
}
