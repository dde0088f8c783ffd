//! HTTP request handlers for the tip engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    allocate_tips, allocation_audit_step, allocation_warnings, estimate_payroll,
    payroll_audit_step, round_allocation, round_to_cents,
};
use crate::error::{EngineError, EngineResult};
use crate::ledger::confirm_allocation;
use crate::models::{AuditTrace, TipPoolInput};

use super::request::{PayrollEstimateRequest, TipAllocationRequest};
use super::response::{
    AllocationLine, ApiError, ApiErrorResponse, ENGINE_VERSION, PayrollEstimateResponse,
    TipAllocationResponse, TransactionsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tips/allocate", post(allocate_handler))
        .route("/tips/confirm", post(confirm_handler))
        .route("/tips/transactions", get(transactions_handler))
        .route("/payroll/estimate", post(payroll_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Translates a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /tips/allocate.
///
/// Allocates the pool and returns unrounded and cent-rounded shares.
async fn allocate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TipAllocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tip allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let input = request.to_input(state.config());
    let start_time = Instant::now();

    match build_allocation_response(&input) {
        Ok(mut response) => {
            let duration = start_time.elapsed();
            response.audit_trace.duration_us = duration.as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                policy = input.policy.as_str(),
                staff_count = input.staff.len(),
                total_tips = %response.total_tips_display,
                warnings = response.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "Tip allocation completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn build_allocation_response(input: &TipPoolInput) -> EngineResult<TipAllocationResponse> {
    let allocation = allocate_tips(input)?;
    let display_amounts = round_allocation(&allocation)?;

    let results = allocation
        .results
        .iter()
        .zip(display_amounts)
        .map(|(result, display_amount)| AllocationLine {
            staff_id: result.staff_id.clone(),
            tip_amount: result.tip_amount,
            display_amount,
            basis: result.basis.clone(),
        })
        .collect();

    Ok(TipAllocationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        policy: input.policy,
        total_tips: allocation.total_tips,
        total_tips_display: round_to_cents(allocation.total_tips)?,
        results,
        audit_trace: AuditTrace {
            steps: vec![allocation_audit_step(input, &allocation, 1)],
            warnings: allocation_warnings(input),
            duration_us: 0,
        },
    })
}

/// Handler for POST /tips/confirm.
///
/// Allocates the pool, converts the shares into ledger records and hands
/// them to the ledger sink.
async fn confirm_handler(
    State(state): State<AppState>,
    payload: Result<Json<TipAllocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tip confirmation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let input = request.to_input(state.config());
    let date = request
        .date
        .unwrap_or_else(|| state.config().business_date(Utc::now()));

    let result = allocate_tips(&input)
        .and_then(|allocation| confirm_allocation(&input, &allocation, date, Utc::now()))
        .and_then(|transactions| {
            state.ledger().record(&transactions)?;
            Ok(transactions)
        });

    match result {
        Ok(transactions) => {
            info!(
                correlation_id = %correlation_id,
                policy = input.policy.as_str(),
                date = %date,
                recorded = transactions.len(),
                "Tip transactions recorded"
            );
            json_response(StatusCode::CREATED, TransactionsResponse { transactions })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /tips/transactions.
async fn transactions_handler(State(state): State<AppState>) -> Response {
    match state.ledger().transactions() {
        Ok(transactions) => {
            debug!(count = transactions.len(), "Listing tip transactions");
            json_response(StatusCode::OK, TransactionsResponse { transactions })
        }
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Handler for POST /payroll/estimate.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollEstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let input = request.into_input(state.config());
    let start_time = Instant::now();

    match estimate_payroll(&input) {
        Ok(estimate) => {
            let duration = start_time.elapsed();
            let step = payroll_audit_step(&input, &estimate, 1);
            info!(
                correlation_id = %correlation_id,
                employees = estimate.total_employees,
                gross_pay = estimate.estimated_gross_pay,
                net_pay = estimate.estimated_net_pay,
                duration_us = duration.as_micros(),
                "Payroll estimate completed successfully"
            );
            json_response(
                StatusCode::OK,
                PayrollEstimateResponse {
                    calculation_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                    engine_version: ENGINE_VERSION.to_string(),
                    estimate,
                    audit_trace: AuditTrace {
                        steps: vec![step],
                        warnings: vec![],
                        duration_us: duration.as_micros() as u64,
                    },
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}
