//! Price calculation for skip offers.

use std::fmt::Display;

use crate::model::Skip;

/// Currency symbol used when displaying prices.
pub const CURRENCY_SYMBOL: &str = "£";

/// Total price including VAT, rounded to whole currency units.
///
/// Halves round away from zero, which for non-negative prices is round-half-up.
#[must_use]
pub fn total_price(skip: &Skip) -> i64 {
    round_to_units(skip.price_before_vat * (1.0 + skip.vat / 100.0))
}

/// VAT share of the total price, rounded to whole currency units.
#[must_use]
pub fn vat_amount(skip: &Skip) -> i64 {
    round_to_units(skip.price_before_vat * skip.vat / 100.0)
}

/// Render an amount with the fixed currency symbol, e.g. `£720`.
#[must_use]
pub fn format_price<T: Display>(amount: T) -> String {
    format!("{CURRENCY_SYMBOL}{amount}")
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "skip prices are far below the i64 range"
)]
fn round_to_units(amount: f64) -> i64 {
    amount.round() as i64
}
