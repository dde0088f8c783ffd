//! Request types for the tip engine API.
//!
//! This module defines the JSON request bodies for the tip and payroll
//! endpoints. Optional policy values fall back to the business configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::models::{
    AllocationPolicy, PayrollEstimateInput, RosterEmployee, StaffMember, TipPoolInput,
};

/// Request body for `/tips/allocate` and `/tips/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipAllocationRequest {
    /// Total sales for the period.
    pub total_sales: f64,
    /// Service charge rate in percent; defaults to the configured rate.
    #[serde(default)]
    pub service_charge_rate: Option<f64>,
    /// Allocation policy; defaults to the configured policy.
    #[serde(default)]
    pub policy: Option<AllocationPolicy>,
    /// Active staff sharing the pool.
    pub staff: Vec<StaffMember>,
    /// Business date for confirmed transactions; defaults to today in the
    /// business's UTC offset.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl TipAllocationRequest {
    /// Builds the tip pool input, filling gaps from configuration.
    pub fn to_input(&self, config: &ConfigLoader) -> TipPoolInput {
        TipPoolInput {
            total_sales: self.total_sales,
            service_charge_rate: self
                .service_charge_rate
                .unwrap_or_else(|| config.default_service_charge_rate()),
            policy: self.policy.unwrap_or_else(|| config.default_policy()),
            staff: self.staff.clone(),
        }
    }
}

/// Request body for `/payroll/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEstimateRequest {
    /// The roster to estimate for.
    pub employees: Vec<RosterEmployee>,
    /// Overrides the configured combined tax rate.
    #[serde(default)]
    pub combined_tax_rate: Option<f64>,
    /// Overrides the configured weekly hours.
    #[serde(default)]
    pub assumed_weekly_hours: Option<f64>,
}

impl PayrollEstimateRequest {
    /// Builds the payroll input, filling gaps from configuration.
    pub fn into_input(self, config: &ConfigLoader) -> PayrollEstimateInput {
        let mut input = config.config().payroll_input(self.employees);
        if let Some(rate) = self.combined_tax_rate {
            input.combined_tax_rate = rate;
        }
        if let Some(hours) = self.assumed_weekly_hours {
            input.assumed_weekly_hours = hours;
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConfigLoader {
        ConfigLoader::load("./config/restaurant").unwrap()
    }

    #[test]
    fn test_deserialize_allocation_request() {
        let json = r#"{
            "total_sales": 1000,
            "service_charge_rate": 18,
            "policy": "equal_split",
            "staff": [
                {"id": "a", "name": "Avery", "role": "server", "hours_worked": 6, "performance_score": 0.9}
            ]
        }"#;

        let request: TipAllocationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.total_sales, 1000.0);
        assert_eq!(request.policy, Some(AllocationPolicy::EqualSplit));
        assert_eq!(request.staff.len(), 1);
        assert!(request.date.is_none());
    }

    #[test]
    fn test_allocation_request_defaults_from_config() {
        let request: TipAllocationRequest =
            serde_json::from_str(r#"{"total_sales": 500, "staff": []}"#).unwrap();

        let input = request.to_input(&config());
        assert_eq!(input.service_charge_rate, 18.0);
        assert_eq!(input.policy, AllocationPolicy::ByHours);
    }

    #[test]
    fn test_payroll_request_overrides_config() {
        let request: PayrollEstimateRequest = serde_json::from_str(
            r#"{"employees": [{"hourly_wage": 15}], "combined_tax_rate": 0.3, "assumed_weekly_hours": 40}"#,
        )
        .unwrap();

        let input = request.into_input(&config());
        assert_eq!(input.combined_tax_rate, 0.3);
        assert_eq!(input.assumed_weekly_hours, 40.0);
    }

    #[test]
    fn test_payroll_request_defaults_from_config() {
        let request: PayrollEstimateRequest =
            serde_json::from_str(r#"{"employees": [{"id": "e1", "hourly_wage": 15}]}"#).unwrap();

        let input = request.into_input(&config());
        assert!((input.combined_tax_rate - 0.2765).abs() < 1e-12);
        assert_eq!(input.assumed_weekly_hours, 32.0);
        assert_eq!(input.employees[0].id.as_deref(), Some("e1"));
    }
}
