//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading business
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::calculation::{MAX_SERVICE_CHARGE_RATE, validate_policy_constants};
use crate::error::{EngineError, EngineResult};
use crate::models::AllocationPolicy;

use super::types::{BusinessConfig, BusinessMetadata, PayrollConfig, TipsConfig};

/// Loads and provides access to business configuration.
///
/// # Directory Structure
///
/// ```text
/// config/restaurant/
/// ├── business.yaml   # Business name, currency, UTC offset
/// ├── payroll.yaml    # Withholding rates and assumed weekly hours
/// └── tips.yaml       # Default service charge rate and policy
/// ```
///
/// # Example
///
/// ```no_run
/// use tip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/restaurant")?;
/// println!("Combined tax rate: {}", loader.combined_tax_rate());
/// # Ok::<(), tip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BusinessConfig,
    offset: FixedOffset,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or unparseable, or if a
    /// loaded value is outside its valid range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<BusinessMetadata>(&path.join("business.yaml"))?;
        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let tips = Self::load_yaml::<TipsConfig>(&path.join("tips.yaml"))?;

        Self::from_config(BusinessConfig::new(metadata, payroll, tips))
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: BusinessConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        let offset = config.business().offset()?;
        Ok(Self { config, offset })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &BusinessConfig) -> EngineResult<()> {
        let rates = &config.payroll().tax_rates;
        for (field, value) in [
            ("tax_rates.federal", rates.federal),
            ("tax_rates.state", rates.state),
            ("tax_rates.fica", rates.fica),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: "must be zero or greater".to_string(),
                });
            }
        }

        validate_policy_constants(
            config.combined_tax_rate(),
            config.payroll().assumed_weekly_hours,
        )?;

        let rate = config.tips().default_service_charge_rate;
        if !rate.is_finite() || !(0.0..=MAX_SERVICE_CHARGE_RATE).contains(&rate) {
            return Err(EngineError::InvalidConfiguration {
                field: "default_service_charge_rate".to_string(),
                message: "must be a percentage between 0 and 100".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the underlying business configuration.
    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    /// Returns the business metadata.
    pub fn business(&self) -> &BusinessMetadata {
        self.config.business()
    }

    /// Returns the combined withholding rate.
    pub fn combined_tax_rate(&self) -> f64 {
        self.config.combined_tax_rate()
    }

    /// Returns the assumed weekly hours per employee.
    pub fn assumed_weekly_hours(&self) -> f64 {
        self.config.payroll().assumed_weekly_hours
    }

    /// Returns the default service charge rate, in percent.
    pub fn default_service_charge_rate(&self) -> f64 {
        self.config.tips().default_service_charge_rate
    }

    /// Returns the default allocation policy.
    pub fn default_policy(&self) -> AllocationPolicy {
        self.config.tips().default_policy
    }

    /// Returns the business date at `now`, in the configured UTC offset.
    pub fn business_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }
}
