//! Pricing
//!
//! Amounts are carried unrounded; rounding to cents happens once, when an
//! amount is rendered.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are rendered with.
pub const MONEY_DP: u32 = 2;

/// Price of `quantity` units at `price` each.
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Calculates the total price of a list of `(price, quantity)` pairs
pub fn total_price<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_total(price, quantity))
        .sum()
}

/// Round to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimal places.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    rounded.rescale(MONEY_DP);

    rounded.to_string()
}

/// Render an amount in its shortest form (`10`, `12.5`).
pub fn format_plain(amount: Decimal) -> String {
    amount.normalize().to_string()
}
