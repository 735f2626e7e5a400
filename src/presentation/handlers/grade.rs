use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{GradeOutcome, GradeRequest};
use crate::domain::{EnEvidence, Verdict, ZhEvidence};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::ApiError;
use super::grading_form::GradingForm;

#[derive(Serialize)]
pub struct TimingsResponse {
    pub asr_ms: u64,
    pub judge_ms: u64,
    pub total_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    #[serde(flatten)]
    pub verdict: Verdict,
    pub transcript_top: String,
    pub candidates: Vec<String>,
    pub zh_augment: Option<ZhEvidence>,
    pub en_homophones: Option<EnEvidence>,
    pub timings: TimingsResponse,
    pub provider: String,
}

impl From<GradeOutcome> for GradeResponse {
    fn from(outcome: GradeOutcome) -> Self {
        Self {
            verdict: outcome.verdict,
            transcript_top: outcome
                .candidates
                .top()
                .unwrap_or_default()
                .to_string(),
            candidates: outcome.candidates.into_vec(),
            zh_augment: outcome.zh_evidence,
            en_homophones: outcome.en_evidence,
            timings: TimingsResponse {
                asr_ms: outcome.timings.asr_ms,
                judge_ms: outcome.timings.judge_ms,
                total_ms: outcome.timings.total_ms,
            },
            provider: outcome.provider.to_string(),
        }
    }
}

/// Full pipeline: recognition, phonetic evidence, LLM judge.
#[tracing::instrument(skip(state, multipart))]
pub async fn grade_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match GradingForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e.body.error, "Rejected grade request");
            return e.into_response();
        }
    };

    tracing::debug!(
        expected = %sanitize_prompt(&form.expected),
        language = %form.language,
        provider = %form.provider,
        bytes = form.clip.bytes.len(),
        "Grading attempt"
    );

    let provider = form.provider;
    let request = GradeRequest {
        clip: form.clip,
        expected: form.expected,
        language: form.language,
        provider,
    };

    match state.grading_service.grade(&request).await {
        Ok(outcome) => Json(GradeResponse::from(outcome)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, stage = e.stage(), "Grading failed");
            ApiError::from_grading(&e, Some(provider.as_str())).into_response()
        }
    }
}
