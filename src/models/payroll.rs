//! Payroll estimate models.
//!
//! This module contains the [`PayrollEstimateInput`] and [`PayrollEstimateResult`]
//! types used by the payroll estimator.

use serde::{Deserialize, Serialize};

/// An employee as seen by the payroll estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEmployee {
    /// Optional identifier, carried for logging only.
    #[serde(default)]
    pub id: Option<String>,
    /// Hourly wage. Must be non-negative.
    pub hourly_wage: f64,
}

impl RosterEmployee {
    /// Creates an anonymous roster entry with the given wage.
    pub fn with_wage(hourly_wage: f64) -> Self {
        Self {
            id: None,
            hourly_wage,
        }
    }
}

/// Input to a payroll estimate.
///
/// `combined_tax_rate` and `assumed_weekly_hours` are policy constants
/// supplied by the business configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEstimateInput {
    /// The roster to estimate for.
    pub employees: Vec<RosterEmployee>,
    /// Sum of federal, state and FICA withholding fractions (e.g., 0.30).
    pub combined_tax_rate: f64,
    /// Average hours each employee is assumed to work in a week.
    pub assumed_weekly_hours: f64,
}

/// Aggregate payroll figures for a pay period.
///
/// `estimated_net_pay` is always exactly `estimated_gross_pay - estimated_taxes`.
///
/// # Example
///
/// ```
/// use tip_engine::models::PayrollEstimateResult;
///
/// let result = PayrollEstimateResult {
///     total_employees: 2,
///     average_hourly_wage: 16.0,
///     estimated_gross_pay: 1024.0,
///     estimated_taxes: 307.2,
///     estimated_net_pay: 1024.0 - 307.2,
/// };
/// assert_eq!(result.estimated_gross_pay - result.estimated_taxes, result.estimated_net_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEstimateResult {
    /// Number of employees on the roster.
    pub total_employees: usize,
    /// Mean hourly wage across the roster.
    pub average_hourly_wage: f64,
    /// Estimated gross pay for the period.
    pub estimated_gross_pay: f64,
    /// Estimated tax withholding.
    pub estimated_taxes: f64,
    /// Estimated net pay.
    pub estimated_net_pay: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_roster_employee_without_id() {
        let employee: RosterEmployee = serde_json::from_str(r#"{"hourly_wage": 15.5}"#).unwrap();
        assert_eq!(employee.id, None);
        assert_eq!(employee.hourly_wage, 15.5);
    }

    #[test]
    fn test_with_wage_builds_anonymous_entry() {
        let employee = RosterEmployee::with_wage(17.0);
        assert!(employee.id.is_none());
        assert_eq!(employee.hourly_wage, 17.0);
    }

    #[test]
    fn test_serialize_result_field_names() {
        let result = PayrollEstimateResult {
            total_employees: 1,
            average_hourly_wage: 15.0,
            estimated_gross_pay: 480.0,
            estimated_taxes: 144.0,
            estimated_net_pay: 336.0,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_employees"], 1);
        assert_eq!(json["estimated_net_pay"], 336.0);
    }
}
