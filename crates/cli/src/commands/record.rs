//! Record command: add or correct one draw in the history file.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use lotto_stats_core::{AppConfig, DrawRecord, Outcome};
use lotto_stats_data::{HistoryEntry, HistoryStore, Last2};

/// Arguments for the record command.
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Draw id as DDMMYYYY with a Buddhist-era year (e.g. 16092568)
    #[arg(long)]
    pub id: String,

    /// Two-digit result (00-99)
    #[arg(long)]
    pub last2: String,

    /// Where the result came from
    #[arg(long, default_value = "manual")]
    pub source: String,
}

/// Runs the record command.
///
/// # Errors
/// Returns an error if the id or result is invalid, or the history file
/// cannot be read or written.
pub fn run_record(app: &AppConfig, args: &RecordArgs) -> Result<()> {
    let entry = build_entry(args)?;
    let id = entry.id.clone();

    let mut store = HistoryStore::open_or_default(&app.data.history_path)
        .with_context(|| format!("Failed to load history from {}", app.data.history_path))?;
    let updated = store.upsert(entry);
    store
        .save()
        .with_context(|| format!("Failed to save history to {}", app.data.history_path))?;

    tracing::info!(id = %id, updated, entries = store.count(), "draw recorded");
    println!(
        "{} draw id={} last2={} ({} entries)",
        if updated { "Updated" } else { "Saved" },
        id,
        args.last2,
        store.count()
    );
    Ok(())
}

fn build_entry(args: &RecordArgs) -> Result<HistoryEntry> {
    let outcome = Outcome::parse(&args.last2)
        .ok_or_else(|| anyhow!("last2 must be a number in 00-99, got '{}'", args.last2))?;
    DrawRecord::from_id(&args.id, Some(outcome))?;

    let mut entry = HistoryEntry::new(args.id.clone(), Some(Last2::from(outcome)));
    entry.source = args.source.clone();
    Ok(entry)
}
