//! Clamping shared by the calculation lines.

use rust_decimal::Decimal;

/// Clamps negative amounts to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-0.01)), dec!(0));
/// assert_eq!(non_negative(dec!(250.00)), dec!(250.00));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
