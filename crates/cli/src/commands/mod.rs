//! CLI commands for the lotto statistics engine.

pub mod analyze;
pub mod backtest;
pub mod engine_args;
pub mod output;
pub mod record;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use backtest::{run_backtest_command, BacktestArgs};
pub use record::{run_record, RecordArgs};
