//! Currency-precision rounding.
//!
//! The computations work in unrounded `f64`. Anything shown to a person or
//! written to the ledger goes through this module and comes out as a
//! [`Decimal`] with exactly two decimal places.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::TipAllocation;

/// Number of decimal places in a currency amount.
pub const CURRENCY_DECIMALS: u32 = 2;

fn to_decimal(value: f64, field: &str) -> EngineResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("{} cannot be represented as a currency amount", value),
    })
}

fn with_currency_scale(mut value: Decimal) -> Decimal {
    value.rescale(CURRENCY_DECIMALS);
    value
}

/// Rounds an amount to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::round_to_cents;
///
/// assert_eq!(round_to_cents(134.996).unwrap().to_string(), "135.00");
/// assert_eq!(round_to_cents(90.0).unwrap().to_string(), "90.00");
/// ```
pub fn round_to_cents(amount: f64) -> EngineResult<Decimal> {
    let value = to_decimal(amount, "amount")?;
    Ok(with_currency_scale(value.round_dp_with_strategy(
        CURRENCY_DECIMALS,
        RoundingStrategy::MidpointAwayFromZero,
    )))
}

/// Rounds every share of an allocation to cents so the shares add up to the
/// rounded pool exactly.
///
/// Uses the largest-remainder method: each share is floored to the cent, then
/// the cents left over go to the shares with the largest discarded fractions.
/// Ties go to the staff member listed first.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::round_allocation;
/// use tip_engine::models::{AllocationResult, TipAllocation};
///
/// let third = 100.0 / 3.0;
/// let allocation = TipAllocation {
///     results: ["a", "b", "c"]
///         .iter()
///         .map(|id| AllocationResult {
///             staff_id: id.to_string(),
///             tip_amount: third,
///             basis: "Equal distribution".to_string(),
///         })
///         .collect(),
///     total_tips: 100.0,
/// };
///
/// let cents: Vec<String> = round_allocation(&allocation)
///     .unwrap()
///     .iter()
///     .map(|d| d.to_string())
///     .collect();
/// assert_eq!(cents, vec!["33.34", "33.33", "33.33"]);
/// ```
pub fn round_allocation(allocation: &TipAllocation) -> EngineResult<Vec<Decimal>> {
    let hundred = Decimal::ONE_HUNDRED;
    let target_cents = round_to_cents(allocation.total_tips)? * hundred;

    let mut cents = Vec::with_capacity(allocation.results.len());
    let mut remainders = Vec::with_capacity(allocation.results.len());
    for (index, result) in allocation.results.iter().enumerate() {
        let exact = to_decimal(result.tip_amount, "tip_amount")? * hundred;
        let floor = exact.floor();
        cents.push(floor);
        remainders.push((index, exact - floor));
    }

    if cents.is_empty() {
        return Ok(cents);
    }

    // Largest fraction first, earliest index on ties.
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let order: Vec<usize> = remainders.iter().map(|(index, _)| *index).collect();

    let allocated: Decimal = cents.iter().copied().sum();
    let leftover = target_cents - allocated;

    if leftover > Decimal::ZERO {
        give_cents(&mut cents, &order, leftover);
    } else if leftover < Decimal::ZERO {
        // Floating-point drift can overshoot the pool; take back from the
        // smallest fractions.
        let reversed: Vec<usize> = order.iter().rev().copied().collect();
        take_cents(&mut cents, &reversed, -leftover)?;
    }

    Ok(cents
        .into_iter()
        .map(|c| with_currency_scale(c / hundred))
        .collect())
}

/// Spreads `amount` whole cents over the shares, one round at a time in
/// `order`.
fn give_cents(cents: &mut [Decimal], order: &[usize], amount: Decimal) {
    let count = Decimal::from(order.len());
    let per_share = (amount / count).floor();
    let mut extra = amount - per_share * count;

    for &index in order {
        cents[index] += per_share;
        if extra > Decimal::ZERO {
            cents[index] += Decimal::ONE;
            extra -= Decimal::ONE;
        }
    }
}

/// Removes `amount` whole cents from the shares in `order` without taking
/// any share below zero.
fn take_cents(cents: &mut [Decimal], order: &[usize], mut amount: Decimal) -> EngineResult<()> {
    while amount > Decimal::ZERO {
        let funded: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&index| cents[index] > Decimal::ZERO)
            .collect();
        if funded.is_empty() {
            return Err(EngineError::InvalidInput {
                field: "total_tips".to_string(),
                message: "shares cannot be rounded to a negative pool".to_string(),
            });
        }

        let per_share = (amount / Decimal::from(funded.len())).floor();
        if per_share == Decimal::ZERO {
            for &index in &funded {
                if amount == Decimal::ZERO {
                    break;
                }
                cents[index] -= Decimal::ONE;
                amount -= Decimal::ONE;
            }
            return Ok(());
        }

        for &index in &funded {
            let taken = per_share.min(cents[index]);
            cents[index] -= taken;
            amount -= taken;
        }
    }

    Ok(())
}

/// Formats a quantity with at most two decimals and no trailing zeros.
///
/// Sums of fractional hours (e.g. `0.1 + 0.2`) would otherwise leak binary
/// noise into basis strings and audit reasoning.
pub fn format_quantity(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => d.round_dp(CURRENCY_DECIMALS).normalize().to_string(),
        None => value.to_string(),
    }
}
