//! Response types for the parental leave engine API.
//!
//! This module defines the success bodies that wrap several calculator
//! outputs, the error response structures, and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{DaySummary, DeadlineInfo, LeaveBlock, MonthProjection, ParentRole, PayLevel};

/// VAB days one parent has left this year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VabBalance {
    /// Which parent.
    pub role: ParentRole,
    /// VAB days remaining in the calendar year of the request date.
    pub days_remaining: u32,
}

/// Body returned by `/days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysResponse {
    /// Föräldrapenning day balance.
    pub balance: DaySummary,
    /// VAB balance per parent.
    pub vab: Vec<VabBalance>,
}

/// Body returned by `/deadlines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlinesResponse {
    /// The deadline a dashboard should show first.
    pub next: Option<DeadlineInfo>,
    /// Every deadline for the earliest-born child, by date.
    pub all: Vec<DeadlineInfo>,
}

/// A leave block as listed next to its projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockOverview {
    /// Block identifier.
    pub id: Uuid,
    /// Which parent takes the leave.
    pub parent: ParentRole,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// First day after the leave.
    pub end_date: NaiveDate,
    /// The compensation tier drawn.
    pub pay_level: PayLevel,
    /// Share of each day drawn, e.g. "12,5%".
    pub percentage: String,
    /// Calendar days in the block.
    pub calendar_days: u32,
    /// Monday to Friday days in the block.
    pub weekday_count: u32,
    /// Benefit days the block consumes.
    pub days_consumed: Decimal,
    /// Whole months spanned, at least one.
    pub months_span: u32,
}

impl From<&LeaveBlock> for BlockOverview {
    fn from(block: &LeaveBlock) -> Self {
        Self {
            id: block.id,
            parent: block.parent,
            start_date: block.start_date,
            end_date: block.end_date,
            pay_level: block.pay_level,
            percentage: block.fraction.percentage_display().to_string(),
            calendar_days: block.calendar_days(),
            weekday_count: block.weekday_count(),
            days_consumed: block.days_consumed(),
            months_span: block.months_span(),
        }
    }
}

/// Body returned by `/scenario/projection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResponse {
    /// One entry per projected month.
    pub months: Vec<MonthProjection>,
    /// The scenario's blocks, by start date.
    pub blocks: Vec<BlockOverview>,
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

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "MISSING_FIELD",
            format!("missing field: {}", field),
            format!("Required field '{}' was not provided in the request", field),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
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
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Rule table not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRules { year, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Rule table for {} is inconsistent", year),
                    message,
                ),
            },
            EngineError::RulesNotFound { year } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "RULES_NOT_FOUND",
                    format!("No rule table for year {}", year),
                    "Rule tables exist only from the earliest configured year onwards",
                ),
            ),
            EngineError::InvalidLeaveBlock { block_id, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_LEAVE_BLOCK",
                    format!("Invalid leave block '{}': {}", block_id, message),
                    "The scenario contains an invalid leave block",
                ))
            }
            EngineError::InvalidParent { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_PARENT",
                    format!("Invalid parent field '{}': {}", field, message),
                    "The parent data contains invalid information",
                ))
            }
            EngineError::InvalidChild { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_CHILD",
                    format!("Invalid child field '{}': {}", field, message),
                    "The child data contains invalid information",
                ))
            }
            EngineError::ScenarioLimitReached { limit } => {
                ApiErrorResponse::bad_request(ApiError::new(
                    "SCENARIO_LIMIT",
                    format!("A family may hold at most {} scenarios", limit),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_missing_field_error() {
        let error = ApiError::missing_field("scenario");
        assert_eq!(error.code, "MISSING_FIELD");
        assert!(error.message.contains("scenario"));
    }

    #[test]
    fn test_rules_not_found_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::RulesNotFound { year: 2019 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "RULES_NOT_FOUND");
        assert!(api_error.error.message.contains("2019"));
    }

    #[test]
    fn test_invalid_block_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidLeaveBlock {
            block_id: Uuid::nil(),
            message: "end date must be after start date".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_LEAVE_BLOCK");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidRules {
            year: 2026,
            message: "vab cap above sgi cap".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
