//! Response envelope and error mapping shared by all handlers

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response wrapper
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A [`DomainError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::InvalidDateRange(_) => StatusCode::BAD_REQUEST,
            DomainError::Unavailable { .. } | DomainError::BookingConflict { .. } => {
                StatusCode::CONFLICT
            }
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::InvalidTransition { .. }
            | DomainError::InvalidParty(_)
            | DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingStatus;
    use chrono::NaiveDate;

    #[test]
    fn domain_errors_map_to_statuses() {
        let day = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let cases = [
            (DomainError::InvalidDateRange("x".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::Unavailable {
                    room_id: "1".into(),
                    check_in: day,
                    check_out: day,
                },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::BookingConflict {
                    room_id: "1".into(),
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::booking_not_found("b"), StatusCode::NOT_FOUND),
            (
                DomainError::InvalidTransition {
                    from: BookingStatus::CheckedOut,
                    to: BookingStatus::Cancelled,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (DomainError::InvalidParty("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn error_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "nope");
        assert!(body["data"].is_null());
    }
}
