//! Money helpers for closet valuations.
//!
//! Prices are kept as `Decimal` end to end and rounded to the stored
//! precision (two places) before they reach the database.

use rust_decimal::prelude::*;

/// Stored precision for every CAD amount.
pub const DECIMAL_PLACES: u32 = 2;

/// Share of a resale price expected to survive marketplace fees and markdowns.
pub const RESALE_HAIRCUT: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Largest amount a NUMERIC(10,2) column can hold: 99,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Round to the stored precision, midpoint away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Expected net value of a resale price after the haircut.
///
/// `None` in, `None` out: an item without a resale price has no estimate.
pub fn estimated_resale_value(resale_price: Option<Decimal>) -> Option<Decimal> {
    resale_price.map(|price| round_money(price * RESALE_HAIRCUT))
}

/// Convert a model-produced float into a stored amount.
///
/// Rejects NaN, infinities, negatives and values beyond the column range.
pub fn amount_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let amount = round_money(Decimal::from_f64(value)?);
    (amount <= MAX_AMOUNT).then_some(amount)
}

/// Check that a client-supplied amount fits the stored column.
pub fn is_valid_amount(value: Decimal) -> bool {
    !value.is_sign_negative() && value <= MAX_AMOUNT
}
