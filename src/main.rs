use analytics::{
    SymbolFilter, TraderScore, TradingStats, calculate_stats, daily_pnl, equity_curve,
    filter_by_symbol, offset_from_hours, session_heatmap, symbol_performance, unique_symbols,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use configuration::{Config, LoggingSettings, OutputFormat};
use core_types::TradeRecord;
use ingest::StatementParser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod render;

/// The main entry point for the Tradebook journal CLI.
fn main() -> Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Stats(args) => handle_stats(args, &config),
        Commands::Trades(args) => handle_trades(args, &config),
        Commands::Breakdown(args) => handle_breakdown(args, &config),
        Commands::Context(args) => handle_context(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A trading journal: imports broker statements and reports on performance.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to `tradebook.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate statistics and trader grade for a statement.
    Stats(StatsArgs),
    /// List the trades parsed from a statement, most recent first.
    Trades(TradesArgs),
    /// Per-symbol P&L, daily P&L, busiest sessions and the equity curve.
    Breakdown(StatementArgs),
    /// Print the context that would be handed to the trading assistant.
    Context(StatementArgs),
}

#[derive(Parser)]
struct StatementArgs {
    /// The broker statement export to read (comma-delimited text).
    #[arg(long)]
    file: PathBuf,

    /// Restrict to one symbol (e.g. "XAUUSD"); "All" keeps every trade.
    #[arg(long, default_value = "All")]
    symbol: SymbolFilter,
}

#[derive(Parser)]
struct StatsArgs {
    #[command(flatten)]
    statement: StatementArgs,

    /// Output format; overrides `display.output` from the configuration.
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
}

#[derive(Parser)]
struct TradesArgs {
    #[command(flatten)]
    statement: StatementArgs,

    /// Maximum number of trades to list.
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Reads and parses a statement, then applies the symbol filter.
fn load_trades(args: &StatementArgs, offset_hours: i32) -> Result<Vec<TradeRecord>> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read statement {}", args.file.display()))?;

    let parser = StatementParser::with_offset_hours(offset_hours)
        .ok_or_else(|| anyhow!("Invalid closing time offset: {offset_hours} hours"))?;
    let report = parser.parse(&text);

    if report.header_line.is_none() {
        tracing::warn!(file = %args.file.display(), "No statement header found; nothing to import.");
    }
    if report.skipped_count() > 0 {
        tracing::warn!(
            skipped = report.skipped_count(),
            "Some statement rows could not be parsed and were skipped."
        );
    }
    tracing::info!(
        trades = report.trades.len(),
        symbols = unique_symbols(&report.trades).len(),
        "Statement imported."
    );

    Ok(filter_by_symbol(&report.trades, &args.symbol))
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    filter: String,
    stats: &'a TradingStats,
    score: &'a TraderScore,
}

fn handle_stats(args: StatsArgs, config: &Config) -> Result<()> {
    let trades = load_trades(&args.statement, config.import.closing_time_offset_hours)?;
    let stats = calculate_stats(&trades);
    let score = TraderScore::from_stats(&stats);

    match args.output.unwrap_or(config.display.output) {
        OutputFormat::Json => {
            let output = StatsOutput {
                filter: args.statement.symbol.to_string(),
                stats: &stats,
                score: &score,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("{}", render::stats_table(&stats));
            println!("{}", render::score_table(&score));
        }
    }
    Ok(())
}

fn handle_trades(args: TradesArgs, config: &Config) -> Result<()> {
    let trades = load_trades(&args.statement, config.import.closing_time_offset_hours)?;
    println!("{}", render::trades_table(&trades, args.limit));
    Ok(())
}

fn handle_breakdown(args: StatementArgs, config: &Config) -> Result<()> {
    let trades = load_trades(&args, config.import.closing_time_offset_hours)?;
    let offset = offset_from_hours(config.import.closing_time_offset_hours)?;

    println!("{}", render::symbol_table(&symbol_performance(&trades)));
    println!("{}", render::daily_table(&daily_pnl(&trades, offset)));
    println!(
        "{}",
        render::session_table(&session_heatmap(&trades, offset).busiest(config.display.recent_trades))
    );
    println!("{}", render::equity_table(&equity_curve(&trades)));
    Ok(())
}

fn handle_context(args: StatementArgs, config: &Config) -> Result<()> {
    let trades = load_trades(&args, config.import.closing_time_offset_hours)?;
    let stats = calculate_stats(&trades);

    println!(
        "{}",
        advisor::coaching_context(&stats, &trades, config.display.recent_trades)
    );
    println!();
    println!("{}", advisor::risk_diagnosis_context(&stats));
    Ok(())
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stderr always, plus a daily rolling file
/// when `logging.directory` is set. `RUST_LOG` overrides `logging.level`.
fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "tradebook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
