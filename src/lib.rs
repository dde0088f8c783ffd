//! Tip Pool & Payroll Estimation Engine
//!
//! This crate divides restaurant tip pools among staff under a chosen
//! allocation policy and estimates payroll totals for a roster, with an HTTP
//! API and a tip ledger for confirmed allocations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
