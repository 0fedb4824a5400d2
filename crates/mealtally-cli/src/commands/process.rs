//! Process command - extract data from a single receipt.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use mealtally_core::orders::rules::weekday_name;
use mealtally_core::{OrderExtractor, OrderRecord, PdfExtractor, ReceiptParser};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input receipt PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = PdfExtractor::text_from_path(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text extracted from PDF");
    }

    let result = ReceiptParser::from_config(&config.receipts).extract(&text)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result.record)?,
        OutputFormat::Text => format_record_text(&result.record),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record_text(record: &OrderRecord) -> String {
    let missing = || "-".to_string();
    let mut output = String::new();

    output.push_str(&format!(
        "Order: {}\n",
        record.order_id.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Ordered: {}\n",
        record
            .ordered_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Day: {}\n",
        record.weekday.map(|d| weekday_name(d).to_string()).unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Meal: {}\n",
        record.meal_type.map(|m| m.to_string()).unwrap_or_else(missing)
    ));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.items {
        output.push_str(&format!("  {:>3} x {}\n", item.quantity, item.name));
    }
    output.push('\n');

    output.push_str(&format!(
        "Total: {}\n",
        record.total_amount.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!("Promo: {}\n", record.promo_amount));

    output
}
