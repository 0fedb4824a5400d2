//! Receipts command - extract a directory of PDF receipts and write reports.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::debug;

use mealtally_core::orders::rules::timestamps::WEEKDAYS_FROM_SUNDAY;
use mealtally_core::orders::rules::weekday_name;
use mealtally_core::{
    BatchOutcome, OrderRecord, PdfExtractor, ReceiptParser, ReportTable, extract_batch,
};

use super::load_config;
use crate::tables::{write_order_table, write_report};

/// Arguments for the receipts command.
#[derive(Args)]
pub struct ReceiptsArgs {
    /// Glob pattern of receipt PDFs (default: every PDF in the configured input directory)
    input: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep receipts whose timestamp cannot be parsed (without weekday/meal)
    #[arg(long)]
    lenient_timestamps: bool,
}

pub fn run(args: ReceiptsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let pattern = args.input.clone().unwrap_or_else(|| {
        config
            .receipts
            .input_dir
            .join("*.pdf")
            .to_string_lossy()
            .into_owned()
    });

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }

    println!(
        "{} Found {} receipts to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} receipts")?
            .progress_chars("=>-"),
    );

    let strict = config.receipts.strict_timestamps && !args.lenient_timestamps;
    let parser = ReceiptParser::from_config(&config.receipts).with_strict_timestamps(strict);

    let sources = files.iter().map(|p| p.display().to_string());
    let outcome = extract_batch(&parser, sources, |source| {
        debug!("Extracting data for {}", source);
        let text = PdfExtractor::text_from_path(Path::new(source));
        pb.inc(1);
        text
    });

    pb.finish_with_message("Complete");

    let records = outcome.sorted_by_time();
    write_reports(&output_dir, &records, &config.report)?;

    print_summary(&outcome, &records, &output_dir, start);
    Ok(())
}

/// Write the order table, one table per weekday, and one per weekday and
/// configured meal type.
fn write_reports(
    output_dir: &Path,
    records: &[OrderRecord],
    report: &mealtally_core::models::config::ReportConfig,
) -> anyhow::Result<()> {
    write_order_table(&output_dir.join("order_counts.csv"), records)?;

    for day in WEEKDAYS_FROM_SUNDAY {
        let name = weekday_name(day);

        let table = ReportTable::weekday(records, day, report.sort);
        write_report(&output_dir.join(format!("item_counts_{}.csv", name)), &table)?;

        for meal in &report.meal_types {
            let table = ReportTable::weekday_meal(records, day, *meal, report.sort);
            write_report(
                &output_dir.join(format!("item_counts_{}_{}.csv", name, meal)),
                &table,
            )?;
        }
    }

    Ok(())
}

fn print_summary(outcome: &BatchOutcome, records: &[OrderRecord], output_dir: &Path, start: Instant) {
    let total: Decimal = records.iter().filter_map(|r| r.total_value()).sum();
    let promo: Decimal = records.iter().map(|r| r.promo_value()).sum();

    println!();
    println!(
        "{} Processed {} receipts in {:?}",
        style("✓").green(),
        records.len() + outcome.failures.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} field warnings",
        style(records.len()).green(),
        style(outcome.failures.len()).red(),
        outcome.warnings
    );
    println!("   Total spent: {}, promo: {}", total, promo);
    println!(
        "{} Reports written to {}",
        style("✓").green(),
        output_dir.display()
    );

    if !outcome.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &outcome.failures {
            println!("  - {}: {}", failure.source, failure.error);
        }
    }
}
