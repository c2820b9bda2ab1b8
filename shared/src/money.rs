//! Money calculation utilities using rust_decimal for precision
//!
//! Totals are always computed as exact decimals. Rounding to two places
//! happens only when an amount is presented.

use rust_decimal::prelude::*;

/// Presentation precision (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Upper bound (exclusive) of a unit price, matching `NUMERIC(10,2)`
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Largest quantity a single line may carry
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Unit price a menu item or order line may carry: non-negative, at most
/// two decimal places, below [`MAX_PRICE`]
pub fn is_valid_price(price: Decimal) -> bool {
    !price.is_sign_negative() && price.normalize().scale() <= DECIMAL_PLACES && price < MAX_PRICE
}

/// Total for one line: unit price times quantity
///
/// Saturates at `Decimal::MAX` instead of overflowing.
#[inline]
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price
        .checked_mul(Decimal::from(quantity))
        .unwrap_or(Decimal::MAX)
}

/// Exact sum of `price × quantity` over all lines
///
/// Shared by the cart total and the submitted order snapshot so both always
/// agree on the same arithmetic rule. Saturates at `Decimal::MAX`.
pub fn sum_lines<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, (price, quantity)| {
            acc.checked_add(line_total(price, quantity))
                .unwrap_or(Decimal::MAX)
        })
}

/// Round an amount for presentation
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format with the fixed two-decimal convention, e.g. `11.00`
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}
