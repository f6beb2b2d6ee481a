//! Response types for the salary engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Response body for `GET /employees/{no}/annual-plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualPlanResponse {
    /// The employee number.
    pub employee_no: u32,
    /// The employee's capability rank code.
    pub capability_rank: String,
    /// Projected annual base compensation.
    pub annual_total_salary_plan: i64,
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

impl ApiErrorResponse {
    /// Creates a 400 response carrying the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
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
            EngineError::RecordNotFound { record, key } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "RECORD_NOT_FOUND",
                    message,
                    format!("No {} record matches '{}'", record, key),
                ),
            },
            EngineError::InvalidYearMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_YEAR_MONTH",
                    message,
                    "year_month must be a YYYYMM integer with a month between 01 and 12",
                ),
            },
            EngineError::StoreUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "STORE_UNAVAILABLE",
                    "Payroll store unavailable",
                    message,
                ),
            },
            EngineError::InvalidRecord { .. } | EngineError::InvalidWorkRecord { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("INVALID_RECORD", "Stored data is invalid", message),
                }
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_record_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::not_found("capability", "ZZ").into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "RECORD_NOT_FOUND");
        assert_eq!(api_error.error.message, "capability record not found: ZZ");
    }

    #[test]
    fn test_invalid_year_month_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidYearMonth { value: 201513 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_YEAR_MONTH");
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let api_error: ApiErrorResponse = EngineError::StoreUnavailable {
            message: "database is locked".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api_error.error.code, "STORE_UNAVAILABLE");
        assert!(
            api_error
                .error
                .details
                .unwrap()
                .contains("database is locked")
        );
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "overflow".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);

        let api_error: ApiErrorResponse = EngineError::InvalidWorkRecord {
            employee_no: 1,
            year_month: 201504,
            message: "overtime_hours is negative".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "INVALID_RECORD");
    }
}
