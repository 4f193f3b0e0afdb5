//! Error types shared by the estimation engine.

use thiserror::Error;

/// Failures reported by the estimation and backtest engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Not enough usable history to form the requested computation.
    #[error("not enough data: need at least {required} records, got {available}")]
    InsufficientData {
        /// Minimum number of usable records required.
        required: usize,
        /// Number of usable records supplied.
        available: usize,
    },

    /// Configuration rejected at the engine boundary.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A draw record could not be derived from its raw form.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidConfig`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
