use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::Verdict;
use crate::presentation::state::AppState;

use super::error_response::ApiError;
use super::grading_form::GradingForm;

const AUDIO_JUDGE_PROVIDER: &str = "openai-audio";

#[derive(Serialize)]
pub struct JudgeResponse {
    #[serde(flatten)]
    pub verdict: Verdict,
    pub provider: &'static str,
}

/// Single-provider path: the recording goes straight to an audio judge.
#[tracing::instrument(skip(state, multipart))]
pub async fn judge_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match GradingForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match state
        .grading_service
        .judge_audio(&form.clip, &form.expected, &form.language)
        .await
    {
        Ok(verdict) => Json(JudgeResponse {
            verdict,
            provider: AUDIO_JUDGE_PROVIDER,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Audio judging failed");
            ApiError::from_grading(&e, Some(AUDIO_JUDGE_PROVIDER)).into_response()
        }
    }
}
