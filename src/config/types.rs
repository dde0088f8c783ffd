//! Configuration types for the tip engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::FixedOffset;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllocationPolicy, PayrollEstimateInput, RosterEmployee};

/// Metadata about the business.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessMetadata {
    /// The trading name of the restaurant.
    pub name: String,
    /// ISO 4217 currency code used for display (e.g., "USD").
    pub currency: String,
    /// UTC offset the business date is reckoned in (e.g., "-05:00").
    /// Fixed for the whole year; absent means UTC.
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl BusinessMetadata {
    /// Parses the configured UTC offset.
    pub fn offset(&self) -> EngineResult<FixedOffset> {
        match &self.utc_offset {
            None => FixedOffset::east_opt(0).ok_or_else(|| invalid_offset("+00:00")),
            Some(raw) => raw.parse::<FixedOffset>().map_err(|_| invalid_offset(raw)),
        }
    }
}

fn invalid_offset(raw: &str) -> EngineError {
    EngineError::InvalidConfiguration {
        field: "utc_offset".to_string(),
        message: format!("'{}' is not an offset like -05:00", raw),
    }
}

/// Withholding fractions applied to gross pay.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxRates {
    /// Federal income tax withholding fraction.
    pub federal: f64,
    /// State income tax withholding fraction.
    pub state: f64,
    /// Social security and medicare (FICA) fraction.
    pub fica: f64,
}

impl TaxRates {
    /// Returns federal + state + FICA.
    pub fn combined(&self) -> f64 {
        self.federal + self.state + self.fica
    }
}

/// Payroll configuration from payroll.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Withholding fractions.
    pub tax_rates: TaxRates,
    /// Hours each employee is assumed to work per week.
    pub assumed_weekly_hours: f64,
}

/// Tip pool defaults from tips.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct TipsConfig {
    /// Service charge rate applied when a request doesn't give one, in percent.
    pub default_service_charge_rate: f64,
    /// Policy applied when a request doesn't name one.
    pub default_policy: AllocationPolicy,
}

/// The complete business configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    metadata: BusinessMetadata,
    payroll: PayrollConfig,
    tips: TipsConfig,
}

impl BusinessConfig {
    /// Creates a new BusinessConfig from its component parts.
    pub fn new(metadata: BusinessMetadata, payroll: PayrollConfig, tips: TipsConfig) -> Self {
        Self {
            metadata,
            payroll,
            tips,
        }
    }

    /// Returns the business metadata.
    pub fn business(&self) -> &BusinessMetadata {
        &self.metadata
    }

    /// Returns the payroll configuration.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the tip pool defaults.
    pub fn tips(&self) -> &TipsConfig {
        &self.tips
    }

    /// Returns the combined withholding rate (federal + state + FICA).
    pub fn combined_tax_rate(&self) -> f64 {
        self.payroll.tax_rates.combined()
    }

    /// Builds a payroll estimate input for a roster using the configured
    /// tax rate and weekly hours.
    pub fn payroll_input(&self, employees: Vec<RosterEmployee>) -> PayrollEstimateInput {
        PayrollEstimateInput {
            employees,
            combined_tax_rate: self.combined_tax_rate(),
            assumed_weekly_hours: self.payroll.assumed_weekly_hours,
        }
    }
}
