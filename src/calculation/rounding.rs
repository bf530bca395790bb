//! Monetary rounding and calendar constants.

use rust_decimal::{Decimal, RoundingStrategy};

/// Average days per month used to convert between monthly and daily amounts.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(304, 0, 0, false, 1);

/// Days per year used to prorate annual bonuses.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// Months per year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a monetary amount to cents, half away from zero.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
/// assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
