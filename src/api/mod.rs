//! HTTP API module for the tip engine.
//!
//! This module exposes tip allocation, tip confirmation and payroll
//! estimation as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollEstimateRequest, TipAllocationRequest};
pub use response::{
    AllocationLine, ApiError, ENGINE_VERSION, PayrollEstimateResponse, TipAllocationResponse,
    TransactionsResponse,
};
pub use state::AppState;
