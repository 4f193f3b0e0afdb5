use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::error::HistoryError;

/// One backtest case as a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRow {
    pub id: String,
    #[serde(rename = "true")]
    pub true_outcome: String,
    pub top1: String,
    pub top1_prob: f64,
    pub true_prob: f64,
    pub true_rank: usize,
}

pub struct CsvStorage;

impl CsvStorage {
    /// Writes backtest cases to a CSV file.
    ///
    /// Format: id,true,top1,top1_prob,true_prob,true_rank
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_cases(path: impl AsRef<Path>, rows: &[CaseRow]) -> Result<(), HistoryError> {
        let file = File::create(path.as_ref())?;
        let mut writer = Writer::from_writer(file);

        // Serialized rows emit the header themselves.
        if rows.is_empty() {
            writer.write_record(["id", "true", "top1", "top1_prob", "true_prob", "true_rank"])?;
        }
        for row in rows {
            writer.serialize(row)?;
        }

        writer.flush()?;
        tracing::debug!(path = %path.as_ref().display(), rows = rows.len(), "wrote case CSV");
        Ok(())
    }
}
