//! Quantity extraction from noisy text fragments.

/// Parse a quantity from a text fragment.
///
/// Every non-digit character is dropped and the remaining digits are read as
/// a base-10 number, so `"(4"`, `"4)"` and `"x 4"` all yield 4. A fragment
/// without digits yields 0. Values too large for `u64` saturate.
pub fn parse_quantity(raw: &str) -> u64 {
    raw.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}
