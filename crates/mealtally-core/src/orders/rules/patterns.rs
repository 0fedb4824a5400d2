//! Common regex patterns and labels for order receipts.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker that directly follows the order timestamp on a receipt.
pub const PAID_MARKER: &str = "PAID";

/// Line label preceding the total amount.
pub const TOTAL_LABEL: &str = "Total";

/// Line label preceding the promo discount.
pub const PROMO_LABEL: &str = "Promo";

/// Receipt timestamp format after ordinal suffixes are removed.
pub const RECEIPT_TIMESTAMP_FORMAT: &str = "%d %b %Y at %I:%M %p";

lazy_static! {
    // "Zomato order: 4711..." header line
    pub static ref ORDER_ID_LINE: Regex = Regex::new(
        r"(?m)^Zomato order:.*$"
    ).unwrap();

    // Item block between the summary heading and the taxes line
    pub static ref ITEMS_SECTION: Regex = Regex::new(
        r"(?s)Summary\n(.*?)Taxes"
    ).unwrap();

    // "<name> <qty> x <unit price> <currency><line total>"
    pub static ref RECEIPT_ITEM: Regex = Regex::new(
        r"^(.*?\d) x \d+(?:\.\d+)? ?(?:₹|â‚¹|Rs\.?|INR) ?\d[\d,]*(?:\.\d+)?"
    ).unwrap();

    // Day numbers with English ordinal suffixes: 1st, 22nd, 3rd, 19th
    pub static ref ORDINAL_DAY: Regex = Regex::new(
        r"\b(\d{1,2})(?:st|nd|rd|th)\b"
    ).unwrap();

    // Amounts: 1,245.50 or 245
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"\d[\d,]*(?:\.\d+)?"
    ).unwrap();
}
