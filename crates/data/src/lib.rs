//! Draw history storage for the lotto statistics engine.
//!
//! This crate provides:
//! - `history.json` loading, upsert and save ([`HistoryStore`])
//! - Conversion of persisted entries into validated, newest-first records
//! - CSV export of backtest cases

pub mod csv_storage;
pub mod error;
pub mod history;

pub use csv_storage::{CaseRow, CsvStorage};
pub use error::HistoryError;
pub use history::{HistoryEntry, HistoryStore, Last2};
