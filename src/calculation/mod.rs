//! Calculation logic for the tip engine.
//!
//! This module contains the pure computations: tip pool validation and
//! allocation under each policy, payroll estimation, and currency-precision
//! rounding of results for display and the ledger.

mod currency;
mod payroll_estimate;
mod tip_allocation;
mod validation;

pub use currency::{CURRENCY_DECIMALS, format_quantity, round_allocation, round_to_cents};
pub use payroll_estimate::{estimate_payroll, payroll_audit_step, validate_policy_constants};
pub use tip_allocation::{
    EQUAL_SPLIT_BASIS, allocate_tips, allocation_audit_step, allocation_warnings,
};
pub use validation::{MAX_SERVICE_CHARGE_RATE, validate_tip_pool_input};
