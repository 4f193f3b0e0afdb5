//! Outcome frequency counting over arbitrary record subsets.

use lotto_stats_core::{DrawRecord, FrequencyTable};

/// Tabulates outcome counts over `records`.
///
/// Records without an outcome are skipped and do not contribute to `N`.
/// The table is rebuilt on every call; nothing is cached.
pub fn count_outcomes<'a, I>(records: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a DrawRecord>,
{
    let mut table = FrequencyTable::new();
    for outcome in records.into_iter().filter_map(|r| r.outcome) {
        table.add(outcome);
    }
    table
}

/// Counts only records drawn on day-of-month `day`.
pub fn count_by_day<'a, I>(records: I, day: u32) -> FrequencyTable
where
    I: IntoIterator<Item = &'a DrawRecord>,
{
    count_outcomes(records.into_iter().filter(|r| r.day == day))
}

/// Counts only records drawn in `month`.
pub fn count_by_month<'a, I>(records: I, month: u32) -> FrequencyTable
where
    I: IntoIterator<Item = &'a DrawRecord>,
{
    count_outcomes(records.into_iter().filter(|r| r.month == month))
}
