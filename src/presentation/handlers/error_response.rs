use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::GradingError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

/// Error envelope plus the status code it is sent with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(error: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error,
                diagnostics: None,
            },
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            body: ErrorResponse {
                error: "Method not allowed".to_string(),
                diagnostics: None,
            },
        }
    }

    /// Malformed requests are 400, missing credentials 500; upstream
    /// failures are reported with 200 and the `error` field.
    pub fn from_grading(error: &GradingError, provider: Option<&str>) -> Self {
        let status = match error {
            GradingError::UnsupportedAudio(_) => StatusCode::BAD_REQUEST,
            e if e.is_misconfiguration() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        };

        let diagnostics = match status {
            StatusCode::OK => Some(Diagnostics {
                stage: error.stage(),
                provider: provider.map(str::to_string),
                upstream_status: error.upstream_status(),
            }),
            _ => None,
        };

        Self {
            status,
            body: ErrorResponse {
                error: error.to_string(),
                diagnostics,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::method_not_allowed()
}
