//! Report command - rebuild a weekday/meal report from an order table.

use std::fs;
use std::path::PathBuf;

use chrono::Weekday;
use clap::Args;
use console::style;

use mealtally_core::orders::rules::weekday_name;
use mealtally_core::{MealType, ReportTable, SortKey};

use super::{load_config, parse_day, parse_meal};
use crate::tables::{read_order_table, write_report};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Order table written by `receipts` (order_counts.csv)
    #[arg(required = true)]
    table: PathBuf,

    /// Weekday, e.g. Thursday
    #[arg(short, long, value_parser = parse_day)]
    day: Weekday,

    /// Meal type: BREAKFAST, LUNCH, DINNER or UNKNOWN
    #[arg(short, long, value_parser = parse_meal)]
    meal: MealType,

    /// Row order: NAME or QUANTITY_DESC (default from config)
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let outcome = read_order_table(&args.table)?;
    for failure in &outcome.failures {
        eprintln!(
            "{} Skipped {}: {}",
            style("⚠").yellow(),
            failure.source,
            failure.error
        );
    }

    let sort = args.sort.unwrap_or(config.report.sort);
    let table = ReportTable::weekday_meal(&outcome.records, args.day, args.meal, sort);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join(format!(
        "item_counts_{}_{}.csv",
        weekday_name(args.day),
        args.meal
    ));
    write_report(&output_path, &table)?;

    println!(
        "{} {} items written to {}",
        style("✓").green(),
        table.rows.len(),
        output_path.display()
    );

    Ok(())
}
