//! Amount parsing for receipt totals and promos.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_PATTERN;

/// Parse a printed amount such as `"₹1,245.50"` or `"-₹50"`.
///
/// Currency symbols and thousands separators are ignored. A leading minus
/// sign (before or after the currency symbol) makes the amount negative.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let m = AMOUNT_PATTERN.find(raw)?;
    let amount = Decimal::from_str(&m.as_str().replace(',', "")).ok()?;

    let negative = raw[..m.start()].contains(['-', '\u{2212}']);
    Some(if negative { -amount } else { amount })
}
