//! Days command - weekday occurrences between the first and last order.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use mealtally_core::ReportTable;
use mealtally_core::orders::rules::weekday_name;
use mealtally_core::report::calendar::{count_weekdays, order_date_span};

use super::load_config;
use crate::tables::{read_order_table, write_report};

/// Arguments for the days command.
#[derive(Args)]
pub struct DaysArgs {
    /// Order table written by `receipts` (order_counts.csv)
    #[arg(required = true)]
    table: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

pub fn run(args: DaysArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let outcome = read_order_table(&args.table)?;
    let Some((first, last)) = order_date_span(&outcome.records) else {
        anyhow::bail!("No dated orders in {}", args.table.display());
    };

    let counts = count_weekdays(first, last);

    println!("{} Orders from {} to {}", style("ℹ").blue(), first, last);
    for (day, count) in &counts {
        println!("  {:<9} {}", weekday_name(*day), count);
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("day_counts.csv");
    write_report(&output_path, &ReportTable::day_counts(&counts))?;

    println!(
        "{} Day counts written to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}
