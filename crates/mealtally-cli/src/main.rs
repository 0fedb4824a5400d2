//! CLI for aggregating food-delivery orders into item reports.

mod commands;
mod tables;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, days, export, process, receipts, report};

/// Food-delivery order reports - tally ordered items by weekday and meal
#[derive(Parser)]
#[command(name = "mealtally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract PDF receipts and write weekday/meal item reports
    Receipts(receipts::ReceiptsArgs),

    /// Extract a single PDF receipt
    Process(process::ProcessArgs),

    /// Summarize a tabular order export (CSV)
    Export(export::ExportArgs),

    /// Rebuild a weekday/meal report from an order table
    Report(report::ReportArgs),

    /// Count weekdays between the first and last order
    Days(days::DaysArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Receipts(args) => receipts::run(args, config_path),
        Commands::Process(args) => process::run(args, config_path),
        Commands::Export(args) => export::run(args, config_path),
        Commands::Report(args) => report::run(args, config_path),
        Commands::Days(args) => days::run(args, config_path),
        Commands::Config(args) => config::run(args),
    }
}
