//! Analyze command: posterior for the upcoming draw.

use anyhow::{Context, Result};
use clap::Args;
use lotto_stats_core::{AnalysisConfig, AppConfig, TicketConfig};
use lotto_stats_data::HistoryStore;
use lotto_stats_signals::{analyze, AnalysisReport};
use std::fmt::Write as _;

use super::engine_args::EngineArgs;
use super::output::{pct, OutputFormat};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Number of ranked picks to show
    #[arg(long)]
    pub top: Option<usize>,

    /// Day of month to condition on
    #[arg(long)]
    pub target_day: Option<u32>,

    /// Month to condition on (default: month of the latest draw)
    #[arg(long)]
    pub target_month: Option<u32>,

    /// Output format: text, json (default: text)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl AnalyzeArgs {
    fn config(&self, base: &AnalysisConfig) -> AnalysisConfig {
        let mut config = self.engine.apply(base);
        if let Some(top) = self.top {
            config.top = top;
        }
        if let Some(day) = self.target_day {
            config.target_day = day;
        }
        if self.target_month.is_some() {
            config.target_month = self.target_month;
        }
        config
    }
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if the history cannot be loaded or the settings are invalid.
pub fn run_analyze(app: &AppConfig, args: &AnalyzeArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let config = args.config(&app.engine);

    let store = HistoryStore::open(&app.data.history_path)
        .with_context(|| format!("Failed to load history from {}", app.data.history_path))?;
    let records = store.records();
    let report = analyze(&records, &config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", format_report(&report, &config, &app.ticket)),
    }
    Ok(())
}

/// Renders the analysis as a human-readable report.
pub fn format_report(report: &AnalysisReport, config: &AnalysisConfig, ticket: &TicketConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== SUMMARY ===");
    let _ = writeln!(out, "Draws analysed: {}", report.n);
    let _ = writeln!(
        out,
        "Most recent (prev): {}",
        report
            .most_recent_outcome
            .map_or_else(|| "NA".to_string(), |o| o.to_string())
    );
    let _ = writeln!(
        out,
        "target-day={}, target-month={}",
        report.target_day, report.target_month
    );
    let _ = writeln!(
        out,
        "weights=[global,day,month,markov]={}, alpha={}, k={}, epsilon={}",
        config.weights, config.alpha, config.k, config.epsilon
    );

    let _ = writeln!(out, "\n=== TOP PICKS ===");
    for (i, pick) in report.top.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}  | posterior {}", i + 1, pick.outcome, pct(pick.probability));
    }

    let _ = writeln!(
        out,
        "\n=== SIGNIFICANT DEVIATION vs UNIFORM (FDR {}) ===",
        pct(config.fdr)
    );
    if report.significant.is_empty() {
        let _ = writeln!(out, "No outcome deviates significantly from uniform.");
    } else {
        for s in &report.significant {
            let _ = writeln!(
                out,
                "{} : count={}, z={:.2}, p={:.4}",
                s.outcome, s.count, s.z_score, s.p_value
            );
        }
    }

    if let Some(best) = report.best() {
        let _ = writeln!(out, "\n=== EXPECTED VALUE ===");
        let _ = writeln!(
            out,
            "Rank 1 ({}): P={} -> EV {:.2} per ticket at price {}",
            best.outcome,
            pct(best.probability),
            ticket.expected_value(best.probability),
            ticket.price
        );
        let _ = writeln!(out, "Lottery EV is almost surely negative; for study only.");
    }
    out
}
