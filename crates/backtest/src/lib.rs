pub mod metrics;
pub mod walk_forward;

pub use metrics::{SkillAssessment, NLL_FLOOR};
pub use walk_forward::{run_backtest, BacktestCase, BacktestReport, MIN_RECORDS};
