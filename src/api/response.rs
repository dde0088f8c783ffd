//! Response types for the tip engine API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AllocationPolicy, AuditTrace, PayrollEstimateResult, TipTransaction};

/// The engine version reported in responses.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One staff member's share in an allocation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationLine {
    /// The staff member.
    pub staff_id: String,
    /// Unrounded share.
    pub tip_amount: f64,
    /// Share rounded to cents; lines sum to `total_tips_display`.
    pub display_amount: Decimal,
    /// How the share was derived.
    pub basis: String,
}

/// Response body for `/tips/allocate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipAllocationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The policy that was applied.
    pub policy: AllocationPolicy,
    /// The unrounded pool.
    pub total_tips: f64,
    /// The pool rounded to cents.
    pub total_tips_display: Decimal,
    /// Per-staff shares in input order.
    pub results: Vec<AllocationLine>,
    /// Audit trace of the calculation.
    pub audit_trace: AuditTrace,
}

/// Response body for `/payroll/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEstimateResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The estimate.
    #[serde(flatten)]
    pub estimate: PayrollEstimateResult,
    /// Audit trace of the calculation.
    pub audit_trace: AuditTrace,
}

/// Response body for `/tips/confirm` and `/tips/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// The transactions.
    pub transactions: Vec<TipTransaction>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::EmptyStaff => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "EMPTY_STAFF",
                    message,
                    "Add at least one active staff member before allocating tips",
                ),
            },
            EngineError::EmptyRoster => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "EMPTY_ROSTER",
                    message,
                    "Add at least one employee before estimating payroll",
                ),
            },
            EngineError::ZeroBasis { policy } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "ZERO_BASIS",
                    message,
                    format!(
                        "No staff member has any weight under '{}'; choose another policy or correct the roster",
                        policy.as_str()
                    ),
                ),
            },
            EngineError::InvalidConfiguration { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("INVALID_CONFIGURATION", message, field),
            },
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("INVALID_INPUT", message, field),
            },
            EngineError::LedgerError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("LEDGER_ERROR", "Ledger unavailable", message),
            },
        }
    }
}
