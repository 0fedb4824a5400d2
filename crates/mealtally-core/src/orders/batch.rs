//! Batch extraction with a recoverable boundary per record.

use tracing::{debug, warn};

use super::OrderExtractor;
use crate::error::TallyError;
use crate::models::order::OrderRecord;

/// A record that could not be extracted.
#[derive(Debug)]
pub struct RecordFailure {
    /// Where the record came from (file path, row number).
    pub source: String,
    /// Why extraction failed.
    pub error: TallyError,
}

/// Records extracted from a batch plus the ones that failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<OrderRecord>,
    pub failures: Vec<RecordFailure>,
    /// Total number of field-level warnings across successful records.
    pub warnings: usize,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully extracted order.
    pub fn push_record(&mut self, record: OrderRecord) {
        self.records.push(record);
    }

    /// Record a failed source without stopping the batch.
    pub fn push_failure(&mut self, source: impl Into<String>, error: impl Into<TallyError>) {
        let failure = RecordFailure {
            source: source.into(),
            error: error.into(),
        };
        warn!("Failed to extract {}: {}", failure.source, failure.error);
        self.failures.push(failure);
    }

    /// Records ordered by timestamp; records without one come last.
    pub fn sorted_by_time(&self) -> Vec<OrderRecord> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| (r.ordered_at.is_none(), r.ordered_at));
        records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }
}

/// Load and extract every source, isolating failures to the source that
/// caused them.
///
/// `load` turns a source name into its text. A load error and an extraction
/// error are both recorded as a failure of that source; the batch continues.
pub fn extract_batch<E, I, S, L>(extractor: &E, sources: I, mut load: L) -> BatchOutcome
where
    E: OrderExtractor + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<String>,
    L: FnMut(&str) -> crate::Result<String>,
{
    let mut outcome = BatchOutcome::new();

    for source in sources {
        let source = source.into();
        let text = match load(&source) {
            Ok(text) => text,
            Err(e) => {
                outcome.push_failure(source, e);
                continue;
            }
        };

        match extractor.extract(&text) {
            Ok(result) => {
                debug!("Extracted {} with {} warning(s)", source, result.warnings.len());
                for warning in &result.warnings {
                    debug!("{}: {}", source, warning);
                }
                outcome.warnings += result.warnings.len();
                outcome.push_record(result.record);
            }
            Err(e) => outcome.push_failure(source, e),
        }
    }

    outcome
}
