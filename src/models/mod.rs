//! Core data models for the tip engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation;
mod audit;
mod payroll;
mod staff;
mod tip_transaction;

pub use allocation::{AllocationPolicy, AllocationResult, TipAllocation, TipPoolInput};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use payroll::{PayrollEstimateInput, PayrollEstimateResult, RosterEmployee};
pub use staff::StaffMember;
pub use tip_transaction::TipTransaction;
