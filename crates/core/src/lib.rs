//! Core types, configuration and numeric helpers for the two-digit draw
//! estimator.

pub mod config;
pub mod config_loader;
pub mod distribution;
pub mod error;
pub mod outcome;
pub mod record;
pub mod stats;

pub use config::{
    AnalysisConfig, AppConfig, DataConfig, FusionWeights, ServerConfig, TicketConfig,
    MAX_FUSION_WEIGHT, MAX_PRIOR_STRENGTH,
};
pub use config_loader::ConfigLoader;
pub use distribution::{Distribution, FrequencyTable, RankedOutcome};
pub use error::EngineError;
pub use outcome::{Outcome, OUTCOME_COUNT};
pub use record::{
    id_for_date, sort_newest_first, to_chronological, DrawRecord, RecordOrder,
    BUDDHIST_ERA_OFFSET,
};
pub use stats::{binomial_test, erf, normal_cdf, two_sided_p_value, wilson_ci};
