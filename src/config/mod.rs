//! Configuration loading and management for the tip engine.
//!
//! This module loads the business-configuration provider's values from YAML
//! files: business metadata, payroll withholding rates and assumed weekly
//! hours, and tip pool defaults.
//!
//! # Example
//!
//! ```no_run
//! use tip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/restaurant").unwrap();
//! println!("Loaded business: {}", config.business().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BusinessConfig, BusinessMetadata, PayrollConfig, TaxRates, TipsConfig};
