//! The two-digit outcome space.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of distinct outcomes (00 through 99).
pub const OUTCOME_COUNT: usize = 100;

/// A single two-digit draw outcome in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Outcome(u8);

impl Outcome {
    /// Creates an outcome, returning `None` when the value is outside `0..=99`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if (value as usize) < OUTCOME_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates an outcome from a table index.
    ///
    /// # Panics
    /// Panics if `index >= OUTCOME_COUNT`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(index < OUTCOME_COUNT, "outcome index {index} out of range");
        Self(index as u8)
    }

    /// Parses a textual outcome such as `"07"` or `"7"`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        trimmed.parse::<u8>().ok().and_then(Self::new)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the value as an index into a 100-slot table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over every outcome in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..OUTCOME_COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("outcome {value} is outside 0..=99"))
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("outcome {value} is outside 0..=99"))
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
