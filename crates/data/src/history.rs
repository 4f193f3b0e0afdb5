//! Persisted draw history (`history.json`).
//!
//! The file is a JSON array of entries keyed by the `DDMMYYYY` Buddhist-era
//! draw id. Entries are kept verbatim on disk, including fields this crate
//! does not interpret; validation happens only when converting to
//! [`DrawRecord`]s, where unusable entries are skipped.

use chrono::{SecondsFormat, Utc};
use lotto_stats_core::{sort_newest_first, DrawRecord, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::HistoryError;

/// The two-digit result as stored: `"07"`, `7`, or a whole float like `7.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Last2 {
    Number(i64),
    Float(f64),
    Text(String),
}

impl Last2 {
    /// The outcome, if the stored value lies in 0..=99.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Number(n) => Outcome::try_from(*n).ok(),
            Self::Float(x) if x.fract() == 0.0 && (0.0..=99.0).contains(x) => {
                Outcome::new(*x as u8)
            }
            Self::Float(_) => None,
            Self::Text(s) => Outcome::parse(s),
        }
    }
}

impl From<Outcome> for Last2 {
    fn from(outcome: Outcome) -> Self {
        Self::Text(outcome.to_string())
    }
}

/// One persisted draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub date_th: String,
    /// `null` while a draw has no published result.
    #[serde(default)]
    pub last2: Option<Last2>,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub source: String,
    /// Fields written by other tools, preserved on save.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl HistoryEntry {
    /// A fresh entry with only the id and result set.
    #[must_use]
    pub fn new(id: impl Into<String>, last2: Option<Last2>) -> Self {
        Self {
            id: id.into(),
            date_th: String::new(),
            last2,
            endpoint: String::new(),
            fetched_at: None,
            source: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Converts to a validated record.
    ///
    /// Returns `None` when the id is not a calendar date or the result is
    /// missing or outside 0..=99.
    #[must_use]
    pub fn to_record(&self) -> Option<DrawRecord> {
        let outcome = self.last2.as_ref().and_then(Last2::outcome)?;
        DrawRecord::from_id(&self.id, Some(outcome)).ok()
    }
}

/// In-memory copy of `history.json` bound to its path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Loads the history file.
    ///
    /// Array elements that are not entry objects are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`HistoryError::NotFound`] if the file is missing, or an IO or
    /// JSON error if it cannot be read as an array.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        if !path.exists() {
            return Err(HistoryError::NotFound(path));
        }

        let file = File::open(&path)?;
        let raw: Vec<Value> = serde_json::from_reader(BufReader::new(file))?;
        let total = raw.len();

        let entries: Vec<HistoryEntry> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping malformed history entry");
                    None
                }
            })
            .collect();

        debug!(
            path = %path.display(),
            entries = entries.len(),
            malformed = total - entries.len(),
            "loaded history"
        );
        Ok(Self { path, entries })
    }

    /// Loads the history file, starting empty when it does not exist yet.
    ///
    /// # Errors
    /// Returns an IO or JSON error if an existing file cannot be read.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(HistoryError::NotFound(_)) => {
                info!(path = %path.display(), "no history file found, starting empty");
                Ok(Self {
                    path,
                    entries: Vec::new(),
                })
            }
            other => other,
        }
    }

    /// Number of raw entries in the file at `path`; 0 if it is missing or
    /// unreadable.
    #[must_use]
    pub fn count_at(path: impl AsRef<Path>) -> usize {
        let Ok(file) = File::open(path.as_ref()) else {
            return 0;
        };
        serde_json::from_reader::<_, Vec<Value>>(BufReader::new(file))
            .map(|raw| raw.len())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Usable draws, most recent first.
    ///
    /// Entries with an invalid id or without a 0..=99 result are dropped and
    /// the number dropped is logged.
    #[must_use]
    pub fn records(&self) -> Vec<DrawRecord> {
        let mut records: Vec<DrawRecord> =
            self.entries.iter().filter_map(HistoryEntry::to_record).collect();

        let skipped = self.entries.len() - records.len();
        if skipped > 0 {
            warn!(
                skipped,
                usable = records.len(),
                "skipped history entries without a valid id and result"
            );
        }

        sort_newest_first(&mut records);
        records
    }

    /// Inserts `entry`, or merges it into the existing entry with the same id.
    ///
    /// `fetchedAt` is stamped with the current time. Returns `true` if an
    /// existing entry was updated.
    pub fn upsert(&mut self, mut entry: HistoryEntry) -> bool {
        entry.fetched_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            let mut extra = std::mem::take(&mut existing.extra);
            extra.extend(entry.extra);
            entry.extra = extra;
            *existing = entry;
            debug!(id = %existing.id, "updated history entry");
            true
        } else {
            debug!(id = %entry.id, "inserted history entry");
            self.entries.push(entry);
            false
        }
    }

    /// Writes all entries newest-first as pretty-printed JSON.
    ///
    /// Creates parent directories if they don't exist.
    ///
    /// # Errors
    /// Returns an IO or JSON error if the file cannot be written.
    pub fn save(&mut self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        self.entries.sort_by(newest_first_cmp);

        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.entries)?;

        info!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "saved history"
        );
        Ok(())
    }
}

/// Orders entries by derived draw date, newest first. Entries whose id is
/// not a date sort after all dated entries, by id descending.
fn newest_first_cmp(a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
    let date_a = DrawRecord::from_id(&a.id, None).ok();
    let date_b = DrawRecord::from_id(&b.id, None).ok();
    match (date_a, date_b) {
        (Some(ra), Some(rb)) => rb.chronological_cmp(&ra),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.id.cmp(&a.id),
    }
}

// =============================================================================
// Tests
// =============================================================================
