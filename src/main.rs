use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{LogLevel, LoggingSettings, Settings};
use session::{CostSession, GdpSession};
use std::io;
use std::path::PathBuf;
use storage::SeriesRepository;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the econ toolkit.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings =
        configuration::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Costs => handle_costs(&settings),
        Commands::Gdp(args) => handle_gdp(args, &settings),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Command-line economics calculators: cost/revenue analysis and a GDP tracker.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured log level. `RUST_LOG` still takes precedence.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Marginal cost, average cost, total revenue and break-even analysis.
    Costs,
    /// Track GDP components (C + G + I + NX) in named, saveable lists.
    Gdp(GdpArgs),
}

#[derive(Parser)]
struct GdpArgs {
    /// The JSON file the GDP lists are saved to and loaded from.
    #[arg(long)]
    data_file: Option<PathBuf>,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_costs(settings: &Settings) -> Result<()> {
    let mut session = CostSession::new(io::stdin().lock(), io::stdout().lock(), settings.charts);
    session.run().context("Cost/revenue session failed")?;
    Ok(())
}

fn handle_gdp(args: GdpArgs, settings: &Settings) -> Result<()> {
    let data_file = args.data_file.unwrap_or_else(|| settings.gdp.data_file.clone());
    let repository = SeriesRepository::new(data_file);

    let mut session = GdpSession::open(
        io::stdin().lock(),
        io::stdout().lock(),
        repository,
        settings.charts,
    )
    .context("Failed to open GDP data")?;
    session.run().context("GDP session failed")?;
    Ok(())
}

/// Sends log output to a daily rolling file so it never mixes with the menus on stdout.
fn init_tracing(logging: &LoggingSettings) -> Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(logging.file_prefix.as_str())
        .build(&logging.directory)
        .with_context(|| format!("Failed to create log directory {:?}", logging.directory))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_directive()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}
