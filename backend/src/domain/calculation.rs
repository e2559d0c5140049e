//! # Milk Calculations
//!
//! Quality and value formulas used across the ledger:
//!
//! - **SNF** (Richmond's formula): `clr / 4 + fat * 0.2 + 0.7`
//! - **Rate** (fat + SNF pricing): `fat * fat_price / 100 + snf * snf_price / 100`
//! - **Amount**: `quantity * rate`
//!
//! Every result is rounded to two decimal places with midpoint-away-from-zero
//! rounding, so `7.615` becomes `7.62` and `-7.615` becomes `-7.62`.
//! All arithmetic is checked; an overflow is reported as a validation error.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::errors::{EntryError, EntryResult};

const RESULT_SCALE: u32 = 2;

/// Round to the two decimal places used for every derived value
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RESULT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Solids-not-fat percentage from the corrected lactometer reading and fat
pub fn calculate_snf(clr: Decimal, fat: Decimal) -> EntryResult<Decimal> {
    let clr_part = clr
        .checked_div(Decimal::from(4))
        .ok_or_else(|| out_of_range("snf"))?;
    let fat_part = fat
        .checked_mul(Decimal::new(2, 1))
        .ok_or_else(|| out_of_range("snf"))?;
    let raw = clr_part
        .checked_add(fat_part)
        .and_then(|sum| sum.checked_add(Decimal::new(7, 1)))
        .ok_or_else(|| out_of_range("snf"))?;
    Ok(round_half_up(raw))
}

/// Price per litre from fat and SNF content and the per-kg prices of each
pub fn calculate_milk_rate(
    fat: Decimal,
    snf: Decimal,
    fat_price_per_kg: Decimal,
    snf_price_per_kg: Decimal,
) -> EntryResult<Decimal> {
    let hundred = Decimal::ONE_HUNDRED;
    let fat_part = fat
        .checked_mul(fat_price_per_kg)
        .and_then(|value| value.checked_div(hundred))
        .ok_or_else(|| out_of_range("rate"))?;
    let snf_part = snf
        .checked_mul(snf_price_per_kg)
        .and_then(|value| value.checked_div(hundred))
        .ok_or_else(|| out_of_range("rate"))?;
    let raw = fat_part
        .checked_add(snf_part)
        .ok_or_else(|| out_of_range("rate"))?;
    Ok(round_half_up(raw))
}

pub fn calculate_total_amount(quantity: Decimal, rate: Decimal) -> EntryResult<Decimal> {
    let raw = quantity
        .checked_mul(rate)
        .ok_or_else(|| out_of_range("amount"))?;
    Ok(round_half_up(raw))
}

fn out_of_range(field: &str) -> EntryError {
    EntryError::validation(format!("{} is out of the representable range", field))
}
