//! Backtest command: walk-forward evaluation of the estimator.

use anyhow::{Context, Result};
use clap::Args;
use lotto_stats_backtest::{run_backtest, BacktestCase, BacktestReport};
use lotto_stats_core::{AnalysisConfig, AppConfig, FusionWeights};
use lotto_stats_data::{CaseRow, CsvStorage, HistoryStore};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::engine_args::EngineArgs;
use super::output::{pct, OutputFormat};

/// Cases echoed at the end of a text report.
const TAIL_CASES: usize = 10;

/// Arguments for the backtest command.
#[derive(Args, Debug, Clone)]
pub struct BacktestArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Number of most recent draws to evaluate
    #[arg(long)]
    pub bt_last: Option<usize>,

    /// Rank cut-off for top-K accuracy
    #[arg(long)]
    pub bt_top: Option<usize>,

    /// Write settings and results as JSON to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write per-case rows as CSV to this file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Output format: text, json (default: text)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl BacktestArgs {
    fn config(&self, base: &AnalysisConfig) -> AnalysisConfig {
        let mut config = self.engine.apply(base);
        if let Some(bt_last) = self.bt_last {
            config.bt_last = bt_last;
        }
        if let Some(bt_top) = self.bt_top {
            config.bt_top = bt_top;
        }
        config
    }
}

/// Settings echoed next to the results in the JSON summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BacktestSettings {
    bt_last: usize,
    bt_top: usize,
    weights: FusionWeights,
    alpha: f64,
    k: f64,
    epsilon: f64,
}

#[derive(Debug, Serialize)]
struct BacktestSummary<'a> {
    settings: BacktestSettings,
    results: &'a BacktestReport,
}

/// Runs the backtest command.
///
/// # Errors
/// Returns an error if the history cannot be loaded, the settings are
/// invalid, there is too little history, or an output file cannot be written.
pub fn run_backtest_command(app: &AppConfig, args: &BacktestArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let config = args.config(&app.engine);

    let store = HistoryStore::open(&app.data.history_path)
        .with_context(|| format!("Failed to load history from {}", app.data.history_path))?;
    let records = store.records();
    let report = run_backtest(&records, &config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", format_report(&report, &config)),
    }

    if let Some(path) = &args.output {
        write_summary(path, &config, &report)?;
        notify(format, &format!("\nSummary written to {}", path.display()));
    }
    if let Some(path) = &args.csv {
        let rows: Vec<CaseRow> = report.per_case.iter().map(case_row).collect();
        CsvStorage::write_cases(path, &rows)
            .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
        notify(format, &format!("Cases written to {}", path.display()));
    }
    Ok(())
}

/// Status lines stay off stdout when it carries a JSON report.
fn notify(format: OutputFormat, message: &str) {
    match format {
        OutputFormat::Text => println!("{message}"),
        OutputFormat::Json => eprintln!("{}", message.trim_start()),
    }
}

fn write_summary(path: &Path, config: &AnalysisConfig, report: &BacktestReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let summary = BacktestSummary {
        settings: BacktestSettings {
            bt_last: config.bt_last,
            bt_top: config.bt_top,
            weights: config.weights,
            alpha: config.alpha,
            k: config.k,
            epsilon: config.epsilon,
        },
        results: report,
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
    Ok(())
}

fn case_row(case: &BacktestCase) -> CaseRow {
    CaseRow {
        id: case.id.clone(),
        true_outcome: case.true_outcome.to_string(),
        top1: case.top1_outcome.to_string(),
        top1_prob: case.top1_prob,
        true_prob: case.true_prob,
        true_rank: case.true_rank,
    }
}

/// Renders the backtest as a human-readable report.
pub fn format_report(report: &BacktestReport, config: &AnalysisConfig) -> String {
    let mut out = String::new();
    let skill = &report.skill;

    let _ = writeln!(out, "=== BACKTEST SETTINGS ===");
    let _ = writeln!(out, "bt-last={}, bt-top={}", config.bt_last, config.bt_top);
    let _ = writeln!(
        out,
        "weights=[global,day,month,markov]={}, alpha={}, k={}, epsilon={}",
        config.weights, config.alpha, config.k, config.epsilon
    );

    let _ = writeln!(out, "\n=== BACKTEST RESULTS (expanding window) ===");
    let _ = writeln!(out, "Draws evaluated: {}", report.n);
    let _ = writeln!(
        out,
        "Top-1 accuracy: {} (baseline {}, 95% CI {} - {}, p={:.4})",
        pct(report.acc1),
        pct(skill.baseline_acc1),
        pct(skill.acc1_ci.0),
        pct(skill.acc1_ci.1),
        skill.acc1_p_value
    );
    let _ = writeln!(
        out,
        "Top-{} accuracy: {} (baseline {}, 95% CI {} - {}, p={:.4})",
        report.top_k,
        pct(report.acc_k),
        pct(skill.baseline_acc_k),
        pct(skill.acc_k_ci.0),
        pct(skill.acc_k_ci.1),
        skill.acc_k_p_value
    );
    let _ = writeln!(out, "Mean true probability: {}", pct(report.mean_true_p));
    let _ = writeln!(out, "Mean top-1 probability: {}", pct(report.mean_top1_p));
    let _ = writeln!(
        out,
        "Mean NLL (lower is better): {:.4} (uniform {:.4}, gain {:+.4})",
        report.mean_nll,
        report.mean_nll + skill.nll_gain,
        skill.nll_gain
    );

    let _ = writeln!(out, "\nLast {TAIL_CASES} cases (id, true, top1, p(top1), p(true), rank):");
    for case in report.last_cases(TAIL_CASES) {
        let _ = writeln!(
            out,
            "{} | true={} | top1={} | p(top1)={} | p(true)={} | rank={}",
            case.id,
            case.true_outcome,
            case.top1_outcome,
            pct(case.top1_prob),
            pct(case.true_prob),
            case.true_rank
        );
    }
    out
}
