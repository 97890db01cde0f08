//! Free-form price cell parsing.

/// Extracts a non-negative integer price from a spreadsheet cell.
///
/// Every character that is not an ASCII digit is dropped and the remaining
/// digits are read as a base-10 number, so currency symbols, thousands
/// separators and surrounding words are tolerated: `"1 250 ₸"` is `1250`.
/// Input without digits yields `0`. Digit runs too large for `u32`
/// saturate at `u32::MAX`.
///
/// Decimal points are dropped like any other symbol (`"12.50"` is `1250`);
/// the menu is priced in whole tenge.
#[must_use]
pub fn parse_price(raw: &str) -> u32 {
    raw.chars()
        .filter_map(|c| c.to_digit(10).filter(|_| c.is_ascii_digit()))
        .fold(0u32, |acc, digit| acc.saturating_mul(10).saturating_add(digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_currency_and_thousands_separator() {
        assert_eq!(parse_price("1 250 ₸"), 1250);
    }

    #[test]
    fn dash_only_is_zero() {
        assert_eq!(parse_price("—"), 0);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(parse_price(""), 0);
    }

    #[test]
    fn surrounding_text_is_ignored() {
        assert_eq!(parse_price("от 900 тг."), 900);
    }

    #[test]
    fn leading_zeros_are_harmless() {
        assert_eq!(parse_price("0450"), 450);
    }

    #[test]
    fn decimal_point_is_dropped() {
        assert_eq!(parse_price("12.50"), 1250);
    }

    #[test]
    fn non_ascii_digits_are_not_digits() {
        assert_eq!(parse_price("٣٠٠"), 0);
    }

    #[test]
    fn overflow_saturates() {
        assert_eq!(parse_price("99999999999999"), u32::MAX);
    }
}
