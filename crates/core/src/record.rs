//! Draw records keyed by Buddhist-era date ids.
//!
//! A draw id is eight digits, `DDMMYYYY`, where the year is in the Buddhist
//! era (Gregorian year + 543). Calendar fields are derived from the id once,
//! at construction, and records are immutable afterwards.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::EngineError;
use crate::outcome::Outcome;

/// Offset between the Buddhist and Gregorian calendars.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// One historical draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRecord {
    /// Date-coded id, `DDMMYYYY` with a Buddhist-era year.
    pub id: String,
    /// Two-digit outcome, absent when the draw has no published result.
    pub outcome: Option<Outcome>,
    /// Day of month (1-31).
    pub day: u32,
    /// Month (1-12).
    pub month: u32,
    /// Gregorian year.
    pub year_ce: i32,
}

impl DrawRecord {
    /// Derives a record from its id and optional outcome.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidRecord`] if the id is not eight digits or
    /// does not name a real calendar date.
    pub fn from_id(id: &str, outcome: Option<Outcome>) -> Result<Self, EngineError> {
        let (day, month, year_be) = parse_id(id)?;
        let year_ce = year_be - BUDDHIST_ERA_OFFSET;

        if NaiveDate::from_ymd_opt(year_ce, month, day).is_none() {
            return Err(EngineError::InvalidRecord(format!(
                "id {id} is not a calendar date"
            )));
        }

        Ok(Self {
            id: id.to_string(),
            outcome,
            day,
            month,
            year_ce,
        })
    }

    /// Builds a record for a Gregorian date.
    #[must_use]
    pub fn on_date(date: NaiveDate, outcome: Option<Outcome>) -> Self {
        Self {
            id: id_for_date(date),
            outcome,
            day: date.day(),
            month: date.month(),
            year_ce: date.year(),
        }
    }

    /// Returns the Gregorian draw date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year_ce, self.month, self.day)
    }

    /// Returns the Buddhist-era year.
    #[must_use]
    pub const fn year_be(&self) -> i32 {
        self.year_ce + BUDDHIST_ERA_OFFSET
    }

    /// True when the record carries an outcome and may enter statistics.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.outcome.is_some()
    }

    /// Compares two records chronologically (older first), ties by id.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        (self.year_ce, self.month, self.day)
            .cmp(&(other.year_ce, other.month, other.day))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Ordering of a record slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordOrder {
    /// Index 0 is the most recent draw.
    NewestFirst,
    /// Index 0 is the oldest draw.
    OldestFirst,
}

/// Sorts records so the most recent draw comes first.
pub fn sort_newest_first(records: &mut [DrawRecord]) {
    records.sort_by(|a, b| b.chronological_cmp(a));
}

/// Returns an oldest-first copy of a newest-first sequence.
#[must_use]
pub fn to_chronological(newest_first: &[DrawRecord]) -> Vec<DrawRecord> {
    newest_first.iter().rev().cloned().collect()
}

/// Formats the `DDMMYYYY` Buddhist-era id for a Gregorian date.
#[must_use]
pub fn id_for_date(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:04}",
        date.day(),
        date.month(),
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

fn parse_id(id: &str) -> Result<(u32, u32, i32), EngineError> {
    if id.len() != 8 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidRecord(format!(
            "id {id:?} must be eight digits DDMMYYYY"
        )));
    }

    // All-ASCII digits, so byte slicing is safe and parsing cannot fail.
    let day = id[0..2].parse::<u32>().unwrap_or(0);
    let month = id[2..4].parse::<u32>().unwrap_or(0);
    let year_be = id[4..8].parse::<i32>().unwrap_or(0);
    Ok((day, month, year_be))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(v: u8) -> Option<Outcome> {
        Outcome::new(v)
    }

    #[test]
    fn from_id_derives_calendar_fields() {
        let record = DrawRecord::from_id("16092568", outcome(31)).unwrap();
        assert_eq!(record.day, 16);
        assert_eq!(record.month, 9);
        assert_eq!(record.year_ce, 2025);
        assert_eq!(record.year_be(), 2568);
        assert!(record.is_usable());
    }

    #[test]
    fn from_id_rejects_bad_shapes() {
        assert!(DrawRecord::from_id("1609256", None).is_err());
        assert!(DrawRecord::from_id("16-09-2568", None).is_err());
        assert!(DrawRecord::from_id("1609256a", None).is_err());
    }

    #[test]
    fn from_id_rejects_impossible_dates() {
        assert!(DrawRecord::from_id("31022568", None).is_err());
        assert!(DrawRecord::from_id("01132568", None).is_err());
        assert!(DrawRecord::from_id("00012568", None).is_err());
    }

    #[test]
    fn record_without_outcome_is_not_usable() {
        let record = DrawRecord::from_id("01012568", None).unwrap();
        assert!(!record.is_usable());
    }

    #[test]
    fn on_date_matches_from_id() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let built = DrawRecord::on_date(date, outcome(4));
        let parsed = DrawRecord::from_id("01122567", outcome(4)).unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.date(), Some(date));
    }

    #[test]
    fn sort_newest_first_uses_calendar_not_id_text() {
        // Lexically "16012568" > "01022568" but February is more recent.
        let mut records = vec![
            DrawRecord::from_id("16012568", outcome(1)).unwrap(),
            DrawRecord::from_id("01022568", outcome(2)).unwrap(),
            DrawRecord::from_id("16122567", outcome(3)).unwrap(),
        ];
        sort_newest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["01022568", "16012568", "16122567"]);
    }

    #[test]
    fn to_chronological_reverses() {
        let records = vec![
            DrawRecord::from_id("01022568", outcome(2)).unwrap(),
            DrawRecord::from_id("16012568", outcome(1)).unwrap(),
        ];
        let chrono = to_chronological(&records);
        assert_eq!(chrono[0].id, "16012568");
        assert_eq!(chrono[1].id, "01022568");
    }
}
