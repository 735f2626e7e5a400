use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};

use crate::presentation::state::AppState;

use super::error_response::ApiError;
use super::grading_form::GradingForm;

/// Structured assessment path; answers with the bare verdict.
#[tracing::instrument(skip(state, multipart))]
pub async fn assess_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match GradingForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match state
        .grading_service
        .assess(&form.clip, &form.expected, &form.language)
        .await
    {
        Ok(verdict) => Json(verdict).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Assessment failed");
            ApiError::from_grading(&e, Some("azure")).into_response()
        }
    }
}
