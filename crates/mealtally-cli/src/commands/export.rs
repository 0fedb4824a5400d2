//! Export command - summarize a tabular order export.

use std::fs;
use std::path::PathBuf;

use chrono::Weekday;
use clap::Args;
use console::style;

use mealtally_core::orders::rules::{parse_weekday, weekday_name};
use mealtally_core::{ExportRowParser, OrderRecord, ReportTable, SortKey, parse_export};

use super::{load_config, parse_day};
use crate::tables::{read_export, write_order_table, write_report};

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Order export (CSV)
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Weekday for the per-order item summary (default from config)
    #[arg(short, long, value_parser = parse_day)]
    day: Option<Weekday>,

    /// Preamble lines before the header row (default from config)
    #[arg(long)]
    skip_rows: Option<usize>,
}

pub fn run(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(skip_rows) = args.skip_rows {
        config.export.skip_rows = skip_rows;
    }

    let day = match args.day {
        Some(day) => day,
        None => parse_weekday(&config.export.weekday)?,
    };

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let rows = read_export(&args.input, &config.export)?;
    let parser = ExportRowParser::from_config(&config.export);
    let outcome = parse_export(&parser, rows);

    let day_records: Vec<OrderRecord> = outcome
        .records
        .iter()
        .filter(|r| r.weekday == Some(day))
        .cloned()
        .collect();

    write_order_table(&output_dir.join("order_summary.csv"), &outcome.records)?;
    write_report(
        &output_dir.join("item_summary.csv"),
        &ReportTable::per_order(&day_records),
    )?;
    write_report(
        &output_dir.join("item_totals.csv"),
        &ReportTable::totals(&outcome.records, SortKey::Name),
    )?;

    println!(
        "{} Read {} orders, {} on {}",
        style("✓").green(),
        outcome.records.len(),
        day_records.len(),
        weekday_name(day)
    );
    println!(
        "{} Summaries written to {}",
        style("✓").green(),
        output_dir.display()
    );

    Ok(())
}
