//! Payroll estimation.
//!
//! This module aggregates a roster's hourly wages into estimated gross pay,
//! tax withholding and net pay for a pay period.

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayrollEstimateInput, PayrollEstimateResult};

use super::currency::format_quantity;

/// Estimates gross pay, taxes and net pay for a roster.
///
/// ```text
/// average = Σ hourly_wage / n
/// gross   = n × average × assumed_weekly_hours
/// taxes   = gross × combined_tax_rate
/// net     = gross − taxes
/// ```
///
/// # Errors
///
/// - `EmptyRoster` if there are no employees
/// - `InvalidConfiguration` if `combined_tax_rate` is negative or
///   `assumed_weekly_hours` is not positive
/// - `InvalidInput` if any wage is negative or not a number
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::estimate_payroll;
/// use tip_engine::models::{PayrollEstimateInput, RosterEmployee};
///
/// let input = PayrollEstimateInput {
///     employees: vec![RosterEmployee::with_wage(15.0), RosterEmployee::with_wage(17.0)],
///     combined_tax_rate: 0.30,
///     assumed_weekly_hours: 32.0,
/// };
///
/// let result = estimate_payroll(&input).unwrap();
/// assert_eq!(result.average_hourly_wage, 16.0);
/// assert_eq!(result.estimated_gross_pay, 1024.0);
/// ```
pub fn estimate_payroll(input: &PayrollEstimateInput) -> EngineResult<PayrollEstimateResult> {
    if input.employees.is_empty() {
        return Err(EngineError::EmptyRoster);
    }

    validate_policy_constants(input.combined_tax_rate, input.assumed_weekly_hours)?;

    for (index, employee) in input.employees.iter().enumerate() {
        if !employee.hourly_wage.is_finite() || employee.hourly_wage < 0.0 {
            return Err(EngineError::InvalidInput {
                field: format!("employees[{}].hourly_wage", index),
                message: "must be a non-negative number".to_string(),
            });
        }
    }

    let total_employees = input.employees.len();
    let total_wages: f64 = input.employees.iter().map(|e| e.hourly_wage).sum();
    let average_hourly_wage = total_wages / total_employees as f64;

    let estimated_gross_pay =
        total_employees as f64 * average_hourly_wage * input.assumed_weekly_hours;
    let estimated_taxes = estimated_gross_pay * input.combined_tax_rate;
    let estimated_net_pay = estimated_gross_pay - estimated_taxes;

    Ok(PayrollEstimateResult {
        total_employees,
        average_hourly_wage,
        estimated_gross_pay,
        estimated_taxes,
        estimated_net_pay,
    })
}

/// Checks the tax rate and weekly hours supplied by configuration.
pub fn validate_policy_constants(
    combined_tax_rate: f64,
    assumed_weekly_hours: f64,
) -> EngineResult<()> {
    if !combined_tax_rate.is_finite() || combined_tax_rate < 0.0 {
        return Err(EngineError::InvalidConfiguration {
            field: "combined_tax_rate".to_string(),
            message: "must be zero or greater".to_string(),
        });
    }

    if !assumed_weekly_hours.is_finite() || assumed_weekly_hours <= 0.0 {
        return Err(EngineError::InvalidConfiguration {
            field: "assumed_weekly_hours".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    Ok(())
}

/// Builds the audit step for a completed payroll estimate.
pub fn payroll_audit_step(
    input: &PayrollEstimateInput,
    result: &PayrollEstimateResult,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "payroll_estimate".to_string(),
        rule_name: "Payroll Estimate".to_string(),
        input: serde_json::json!({
            "total_employees": result.total_employees,
            "combined_tax_rate": input.combined_tax_rate,
            "assumed_weekly_hours": input.assumed_weekly_hours
        }),
        output: serde_json::json!({
            "average_hourly_wage": result.average_hourly_wage,
            "estimated_gross_pay": result.estimated_gross_pay,
            "estimated_taxes": result.estimated_taxes,
            "estimated_net_pay": result.estimated_net_pay
        }),
        reasoning: format!(
            "{} employees x ${:.2}/h x {}h = ${:.2} gross, less {}% tax = ${:.2} net",
            result.total_employees,
            result.average_hourly_wage,
            format_quantity(input.assumed_weekly_hours),
            result.estimated_gross_pay,
            format_quantity(input.combined_tax_rate * 100.0),
            result.estimated_net_pay
        ),
    }
}
