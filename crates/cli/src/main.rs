use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lotto_stats_core::{AppConfig, ConfigLoader};
use lotto_stats_data::HistoryStore;
use lotto_stats_web_api::{ApiServer, AppState};

mod commands;

use commands::{AnalyzeArgs, BacktestArgs, RecordArgs};

#[derive(Parser)]
#[command(name = "lotto-stats")]
#[command(about = "Posterior estimation and walk-forward backtesting for two-digit lottery draws", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "LOTTO_CONFIG", default_value = "config/Config.toml")]
    config: String,

    /// Config profile overlay (loads Config.<profile>.toml next to the config file)
    #[arg(long, global = true, env = "LOTTO_PROFILE")]
    profile: Option<String>,

    /// History file path (overrides data.history_path)
    #[arg(long, global = true)]
    history: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank outcomes for the upcoming draw
    Analyze(AnalyzeArgs),
    /// Run a walk-forward backtest over recent draws
    Backtest(BacktestArgs),
    /// Print the number of entries in the history file
    Count,
    /// Add or correct a draw in the history file
    Record(RecordArgs),
    /// Start the web API server
    Serve {
        /// Server address (defaults to server.host:server.port)
        #[arg(short, long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON reports on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = load_config(&cli)?;

    match cli.command {
        Commands::Analyze(args) => {
            commands::run_analyze(&app, &args)?;
        }
        Commands::Backtest(args) => {
            commands::run_backtest_command(&app, &args)?;
        }
        Commands::Count => {
            println!("{}", HistoryStore::count_at(&app.data.history_path));
        }
        Commands::Record(args) => {
            commands::run_record(&app, &args)?;
        }
        Commands::Serve { addr } => {
            run_server(&app, addr).await?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut app = match &cli.profile {
        Some(profile) => ConfigLoader::load_with_profile(&cli.config, profile),
        None => ConfigLoader::load(&cli.config),
    }
    .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    if let Some(history) = &cli.history {
        app.data.history_path.clone_from(history);
    }
    tracing::debug!(history = %app.data.history_path, "configuration ready");
    Ok(app)
}

async fn run_server(app: &AppConfig, addr: Option<String>) -> Result<()> {
    let addr = addr.unwrap_or_else(|| app.server.addr());
    tracing::info!("Starting web API server on {}", addr);

    let server = ApiServer::new(AppState::from_config(app));
    server.serve(&addr).await?;

    Ok(())
}
