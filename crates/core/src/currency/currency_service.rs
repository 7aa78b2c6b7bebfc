use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{BASE_DECIMAL_PRECISION, SECONDARY_DECIMAL_PRECISION};

/// Converts a base currency amount into the secondary currency.
///
/// `rate` is expressed as base units per one secondary unit. A non-positive
/// rate yields zero, which callers read as "conversion unavailable".
pub fn convert(amount_in_base: Decimal, rate: Decimal) -> Decimal {
    if rate > Decimal::ZERO {
        amount_in_base.checked_div(rate).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Rounds to whole base currency units, half away from zero.
pub fn round_base(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(BASE_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two secondary currency decimals, half away from zero.
pub fn round_secondary(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        SECONDARY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Brings an operator-entered base amount (price snapshot, profit) to whole
/// units so stored subtotals and totals stay exact integers.
pub fn normalize_base_amount(amount: Decimal) -> Decimal {
    round_base(amount).normalize()
}

/// Formats a base currency amount the es-CO way: `$ 1.234.567`.
pub fn format_base(amount: Decimal) -> String {
    let rounded = round_base(amount);
    let digits = rounded.abs().trunc().normalize().to_string();
    format!(
        "{}$ {}",
        sign_prefix(rounded),
        group_thousands(&digits, '.')
    )
}

/// Formats a secondary currency amount the en-US way: `$1,234.5`.
///
/// Shows between zero and two decimals; trailing zeros are dropped.
pub fn format_secondary(amount: Decimal) -> String {
    let rounded = round_secondary(amount);
    let text = rounded.abs().normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let mut formatted = format!("{}${}", sign_prefix(rounded), group_thousands(int_part, ','));
    if let Some(frac) = frac_part {
        formatted.push('.');
        formatted.push_str(frac);
    }
    formatted
}

fn sign_prefix(amount: Decimal) -> &'static str {
    if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_with_positive_rate() {
        assert_eq!(convert(dec!(100), dec!(50)), dec!(2));
        assert_eq!(convert(dec!(200000), dec!(4000)), dec!(50));
    }

    #[test]
    fn test_convert_with_non_positive_rate_is_zero() {
        assert_eq!(convert(dec!(100), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(convert(dec!(100), dec!(-5)), Decimal::ZERO);
    }

    #[test]
    fn test_round_base_half_away_from_zero() {
        assert_eq!(round_base(dec!(1000.5)), dec!(1001));
        assert_eq!(round_base(dec!(1000.49)), dec!(1000));
        assert_eq!(round_base(dec!(-2.5)), dec!(-3));
    }

    #[test]
    fn test_round_secondary_two_places() {
        assert_eq!(round_secondary(dec!(57.142857)), dec!(57.14));
        assert_eq!(round_secondary(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_format_base() {
        assert_eq!(format_base(dec!(200000)), "$ 200.000");
        assert_eq!(format_base(dec!(1234567.6)), "$ 1.234.568");
        assert_eq!(format_base(dec!(999)), "$ 999");
        assert_eq!(format_base(Decimal::ZERO), "$ 0");
        assert_eq!(format_base(dec!(-1500)), "-$ 1.500");
    }

    #[test]
    fn test_format_secondary() {
        assert_eq!(format_secondary(dec!(57.142857)), "$57.14");
        assert_eq!(format_secondary(dec!(57.10)), "$57.1");
        assert_eq!(format_secondary(dec!(57)), "$57");
        assert_eq!(format_secondary(dec!(1234.5)), "$1,234.5");
        assert_eq!(format_secondary(dec!(0.001)), "$0");
    }

    #[test]
    fn test_formatting_does_not_change_value() {
        let amount = dec!(1234.5678);
        let _ = format_base(amount);
        let _ = format_secondary(amount);
        assert_eq!(amount, dec!(1234.5678));
    }
}
