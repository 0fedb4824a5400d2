//! Labeled field extraction: order id header and "label on one line, value
//! on the next" fields such as totals.

use super::FieldExtractor;
use super::patterns::ORDER_ID_LINE;

/// Extract the order id from the first order header line.
///
/// The value is the text after the first `": "` on that line.
pub fn extract_order_id(text: &str) -> Option<String> {
    let line = ORDER_ID_LINE.find(text)?.as_str();
    let (_, value) = line.split_once(": ")?;
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_string())
}

/// Extracts the line immediately following a line equal to `label`.
pub struct LabeledValueExtractor {
    label: &'static str,
}

impl LabeledValueExtractor {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl FieldExtractor for LabeledValueExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lines: Vec<&str> = text.lines().collect();
        let index = lines.iter().position(|l| l.trim() == self.label)?;

        lines
            .get(index + 1)
            .map(|l| l.trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines: Vec<&str> = text.lines().collect();

        lines
            .windows(2)
            .filter(|w| w[0].trim() == self.label)
            .map(|w| w[1].trim().to_string())
            .collect()
    }
}
