//! Currency precision helpers.
//!
//! Amounts are carried as [`Decimal`] and snapped to two decimal places
//! wherever they enter or leave the engine.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in the currency.
pub const CURRENCY_SCALE: u32 = 2;

/// Smallest representable currency amount (one cent).
pub const MINOR_UNIT: Decimal = Decimal::from_parts(1, 0, 0, false, CURRENCY_SCALE);

/// Rounds to currency precision, half away from zero.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates toward negative infinity at currency precision.
#[must_use]
pub fn floor_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::ToNegativeInfinity)
}

/// True when two totals differ by at most one minor unit.
#[must_use]
pub fn within_minor_unit(expected: Decimal, actual: Decimal) -> bool {
    (expected - actual).abs() <= MINOR_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minor_unit_is_one_cent() {
        assert_eq!(MINOR_UNIT, dec!(0.01));
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(round_currency(dec!(33.335)), dec!(33.34));
        assert_eq!(round_currency(dec!(-33.335)), dec!(-33.34));
        assert_eq!(floor_currency(dec!(33.339)), dec!(33.33));
        assert_eq!(floor_currency(dec!(-33.331)), dec!(-33.34));
    }

    #[test]
    fn test_within_minor_unit() {
        assert!(within_minor_unit(dec!(100.00), dec!(99.99)));
        assert!(within_minor_unit(dec!(100.00), dec!(100.01)));
        assert!(!within_minor_unit(dec!(100.00), dec!(99.98)));
    }
}
