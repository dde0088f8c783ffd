//! Input validation for tip pools.
//!
//! The allocator runs these checks itself, but callers can run them early to
//! reject a form before any computation happens.

use crate::error::{EngineError, EngineResult};
use crate::models::TipPoolInput;

/// Upper bound of the service charge rate, in percent.
pub const MAX_SERVICE_CHARGE_RATE: f64 = 100.0;

fn invalid(field: impl Into<String>, message: impl Into<String>) -> EngineError {
    EngineError::InvalidInput {
        field: field.into(),
        message: message.into(),
    }
}

/// Validates a tip pool before allocation.
///
/// Checks, in order:
/// 1. The staff list is non-empty (`EmptyStaff`)
/// 2. `total_sales` is positive and finite
/// 3. `service_charge_rate` is finite and within [0, 100]
/// 4. Each staff member has finite, non-negative hours and a score in [0, 1]
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::validate_tip_pool_input;
/// use tip_engine::models::{AllocationPolicy, TipPoolInput};
/// use tip_engine::error::EngineError;
///
/// let input = TipPoolInput {
///     total_sales: 1000.0,
///     service_charge_rate: 18.0,
///     policy: AllocationPolicy::EqualSplit,
///     staff: vec![],
/// };
/// assert!(matches!(validate_tip_pool_input(&input), Err(EngineError::EmptyStaff)));
/// ```
pub fn validate_tip_pool_input(input: &TipPoolInput) -> EngineResult<()> {
    if input.staff.is_empty() {
        return Err(EngineError::EmptyStaff);
    }

    if !input.total_sales.is_finite() || input.total_sales <= 0.0 {
        return Err(invalid("total_sales", "must be a positive number"));
    }

    if !input.service_charge_rate.is_finite()
        || !(0.0..=MAX_SERVICE_CHARGE_RATE).contains(&input.service_charge_rate)
    {
        return Err(invalid(
            "service_charge_rate",
            "must be a percentage between 0 and 100",
        ));
    }

    for (index, member) in input.staff.iter().enumerate() {
        if !member.hours_worked.is_finite() || member.hours_worked < 0.0 {
            return Err(invalid(
                format!("staff[{}].hours_worked", index),
                format!("'{}' must have a non-negative number of hours", member.id),
            ));
        }
        if !member.performance_score.is_finite()
            || !(0.0..=1.0).contains(&member.performance_score)
        {
            return Err(invalid(
                format!("staff[{}].performance_score", index),
                format!("'{}' must have a score between 0 and 1", member.id),
            ));
        }
    }

    Ok(())
}
