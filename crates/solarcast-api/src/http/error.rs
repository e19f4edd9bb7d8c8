//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use solarcast_types::error::ForecastError;

use crate::http::response::ErrorEnvelope;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Forecast generation failed (bad horizon or model failure).
    Forecast(ForecastError),
    /// Malformed or invalid request input.
    Validation(String),
}

impl From<ForecastError> for AppError {
    fn from(e: ForecastError) -> Self {
        AppError::Forecast(e)
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Forecast(e) if e.is_validation() => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Forecast(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_ERROR", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
        } else {
            tracing::debug!(code, error = %message, "request rejected");
        }

        let request_id = uuid::Uuid::now_v7().to_string();
        let body = ErrorEnvelope::new(code, &message, request_id, 0);
        let body = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"data":null,"errors":[{"code":"SERIALIZATION_ERROR","message":"Failed to serialize response"}]}"#.to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarcast_types::error::ModelError;

    #[test]
    fn horizon_errors_are_bad_request() {
        let (status, code, _) = AppError::from(ForecastError::HorizonTooShort(0)).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");

        let (status, _, message) =
            AppError::from(ForecastError::HorizonTooLong { days: 120, max: 90 }).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("120"));
    }

    #[test]
    fn model_errors_are_internal() {
        let err = ForecastError::from(ModelError::MissingRegressor("humidity".into()));
        let (status, code, message) = AppError::from(err).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "MODEL_ERROR");
        assert!(message.contains("humidity"));
    }
}
