use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Two-decimal currency rendering, e.g. `$100.00` or `-$5.50`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Parses user-entered amounts such as `100`, `24.5` or `$1,250.00`.
///
/// Only the configured currency `symbol` is stripped; any other symbol makes the input invalid.
pub fn parse_amount(input: &str, symbol: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let without_symbol = if symbol.is_empty() {
        trimmed.to_string()
    } else {
        trimmed.replacen(symbol, "", 1)
    };
    let cleaned: String = without_symbol
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Sum that clamps at the representable range instead of panicking.
pub fn saturating_total<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(100), "$"), "$100.00");
        assert_eq!(format_money(dec!(36), "$"), "$36.00");
        assert_eq!(format_money(dec!(2.005), "$"), "$2.01");
        assert_eq!(format_money(dec!(-5.5), "€"), "-€5.50");
        assert_eq!(format_money(dec!(-0.001), "$"), "$0.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100", "$"), Some(dec!(100)));
        assert_eq!(parse_amount(" 24.5 ", "$"), Some(dec!(24.5)));
        assert_eq!(parse_amount("$1,250.00", "$"), Some(dec!(1250.00)));
        assert_eq!(parse_amount("-3", "$"), Some(dec!(-3)));
        assert_eq!(parse_amount("", "$"), None);
        assert_eq!(parse_amount("$", "$"), None);
        assert_eq!(parse_amount("ten", "$"), None);
    }

    #[test]
    fn test_parse_amount_strips_only_configured_symbol() {
        assert_eq!(parse_amount("€1,250.50", "€"), Some(dec!(1250.50)));
        assert_eq!(parse_amount("J$80", "J$"), Some(dec!(80)));
        assert_eq!(parse_amount("$80", "€"), None);
        assert_eq!(parse_amount("€80", "$"), None);
    }

    #[test]
    fn test_parse_amount_beyond_range_is_rejected() {
        assert_eq!(parse_amount("792281625142643375935439503350", "$"), None);
        assert_eq!(
            parse_amount("79228162514264337593543950335", "$"),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn test_saturating_total() {
        assert_eq!(saturating_total([dec!(1.5), dec!(2.5)]), dec!(4));
        assert_eq!(saturating_total(Vec::new()), Decimal::ZERO);
        assert_eq!(saturating_total([Decimal::MAX, dec!(1)]), Decimal::MAX);
    }
}
