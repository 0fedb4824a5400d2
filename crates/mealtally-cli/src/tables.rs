//! CSV reading and writing for order tables, exports and reports.

use std::fs;
use std::path::Path;

use tracing::debug;

use mealtally_core::models::config::ExportConfig;
use mealtally_core::report::OrderTableRow;
use mealtally_core::{BatchOutcome, ExportRow, ExtractionError, OrderRecord, ReportTable};

/// Write a report table with its header row.
pub fn write_report(path: &Path, table: &ReportTable) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    debug!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

/// Write the order summary table.
pub fn write_order_table(path: &Path, records: &[OrderRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;

    wtr.write_record(OrderTableRow::HEADERS)?;
    for record in records {
        wtr.serialize(OrderTableRow::from_record(record))?;
    }

    wtr.flush()?;
    debug!("Wrote {} orders to {}", records.len(), path.display());
    Ok(())
}

/// Read an order summary table back into records.
///
/// Rows that fail to parse are reported in the outcome's failures.
pub fn read_order_table(path: &Path) -> anyhow::Result<BatchOutcome> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut outcome = BatchOutcome::new();

    for (index, row) in rdr.deserialize::<OrderTableRow>().enumerate() {
        let source = format!("{} row {}", path.display(), index + 2);
        match row {
            Ok(row) => match row.into_record() {
                Ok(record) => outcome.push_record(record),
                Err(e) => outcome.push_failure(source, e),
            },
            Err(e) => outcome.push_failure(
                source,
                ExtractionError::Parse {
                    field: "order table row".to_string(),
                    value: e.to_string(),
                },
            ),
        }
    }

    Ok(outcome)
}

/// Column positions of the configured export fields.
struct ExportColumns {
    order_id: usize,
    timestamp: usize,
    total: usize,
    promo: Option<usize>,
    items: Vec<usize>,
}

impl ExportColumns {
    fn resolve(headers: &[String], config: &ExportConfig) -> anyhow::Result<Self> {
        let find = |name: &str| -> anyhow::Result<usize> {
            headers
                .iter()
                .position(|h| h == name.trim())
                .ok_or_else(|| anyhow::anyhow!("Column not found in export: {:?}", name))
        };

        let mut items = Vec::new();
        for name in &config.item_columns {
            items.push(find(name)?);
        }
        if config.include_unnamed_columns {
            items.extend(
                headers
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| h.is_empty())
                    .map(|(i, _)| i),
            );
        }
        items.sort_unstable();

        Ok(Self {
            order_id: find(&config.order_id_column)?,
            timestamp: find(&config.timestamp_column)?,
            total: find(&config.total_column)?,
            promo: config.promo_column.as_deref().map(find).transpose()?,
            items,
        })
    }
}

/// Read a tabular order export, skipping the configured preamble lines.
pub fn read_export(path: &Path, config: &ExportConfig) -> anyhow::Result<Vec<ExportRow>> {
    let content = fs::read_to_string(path)?;
    let body: String = content
        .lines()
        .skip(config.skip_rows)
        .collect::<Vec<_>>()
        .join("\n");

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let columns = ExportColumns::resolve(&headers, config)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cell = |i: usize| {
            record
                .get(i)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        };

        rows.push(ExportRow {
            order_id: cell(columns.order_id),
            ordered_at: cell(columns.timestamp),
            item_cells: columns.items.iter().filter_map(|&i| cell(i)).collect(),
            total_amount: cell(columns.total),
            promo_amount: columns.promo.and_then(cell),
        });
    }

    debug!("Read {} export rows from {}", rows.len(), path.display());
    Ok(rows)
}
