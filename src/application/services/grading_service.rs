use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{
    AssessmentError, JudgeClient, JudgeError, PronunciationAssessor, TranscriptionError,
};
use crate::domain::{
    AudioClip, CandidateList, EnEvidence, LanguageTag, RecognitionProvider, Verdict, ZhEvidence,
    assessment_verdict,
};
use crate::infrastructure::observability::sanitize_prompt;

use super::judge_prompt::{build_audio_prompt, build_evidence_prompt};
use super::phonetic_evidence_service::PhoneticEvidenceService;
use super::recognition_service::{RecognitionError, RecognitionService};

#[derive(Debug, Clone)]
pub struct GradeRequest {
    pub clip: AudioClip,
    pub expected: String,
    pub language: LanguageTag,
    pub provider: RecognitionProvider,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timings {
    pub asr_ms: u64,
    pub judge_ms: u64,
    pub total_ms: u64,
}

#[derive(Debug, Clone)]
pub struct GradeOutcome {
    pub verdict: Verdict,
    pub candidates: CandidateList,
    pub zh_evidence: Option<ZhEvidence>,
    pub en_evidence: Option<EnEvidence>,
    pub timings: Timings,
    pub provider: RecognitionProvider,
}

pub struct GradingService {
    recognition: Arc<RecognitionService>,
    evidence: Arc<PhoneticEvidenceService>,
    judge: Arc<dyn JudgeClient>,
    audio_judge: Arc<dyn JudgeClient>,
    assessor: Arc<dyn PronunciationAssessor>,
}

impl GradingService {
    pub fn new(
        recognition: Arc<RecognitionService>,
        evidence: Arc<PhoneticEvidenceService>,
        judge: Arc<dyn JudgeClient>,
        audio_judge: Arc<dyn JudgeClient>,
        assessor: Arc<dyn PronunciationAssessor>,
    ) -> Self {
        Self {
            recognition,
            evidence,
            judge,
            audio_judge,
            assessor,
        }
    }

    /// Recognize, gather evidence, judge. No recognized speech short-circuits
    /// to a failing verdict without calling the judge.
    pub async fn grade(&self, request: &GradeRequest) -> Result<GradeOutcome, GradingError> {
        if !self.recognition.is_configured(request.provider) {
            return Err(GradingError::MissingCredentials(match request.provider {
                RecognitionProvider::Primary => "OPENAI_API_KEY",
                RecognitionProvider::Secondary => "AZURE_SPEECH_KEY",
            }));
        }
        if !self.judge.is_configured() {
            return Err(GradingError::MissingCredentials("OPENAI_API_KEY"));
        }

        let started = Instant::now();
        let recognition = self
            .recognition
            .recognize(&request.clip, &request.language, request.provider)
            .await?;
        let asr_ms = elapsed_ms(started);

        tracing::info!(
            provider = %recognition.provider_used,
            candidates = recognition.candidates.len(),
            top = %sanitize_prompt(recognition.candidates.top().unwrap_or_default()),
            asr_ms,
            "Recognition finished"
        );

        if recognition.candidates.is_empty() {
            return Ok(GradeOutcome {
                verdict: Verdict::default(),
                candidates: recognition.candidates,
                zh_evidence: None,
                en_evidence: None,
                timings: Timings {
                    asr_ms,
                    judge_ms: 0,
                    total_ms: elapsed_ms(started),
                },
                provider: recognition.provider_used,
            });
        }

        let top = recognition.candidates.top();
        let zh_evidence = self.evidence.build_zh_evidence(top, &request.language).await;
        let en_evidence = self.evidence.build_en_evidence(top, &request.language).await;

        let prompt = build_evidence_prompt(
            &request.expected,
            &request.language,
            &recognition.candidates,
            zh_evidence.as_ref(),
            en_evidence.as_ref(),
        );

        let judge_started = Instant::now();
        let raw = self.judge.complete_json(&prompt).await?;
        let judge_ms = elapsed_ms(judge_started);
        let verdict = Verdict::from_judge_text(&raw);

        tracing::info!(
            pass = verdict.pass,
            score = verdict.score,
            judge_ms,
            "Judge verdict normalized"
        );

        Ok(GradeOutcome {
            verdict,
            candidates: recognition.candidates,
            zh_evidence,
            en_evidence,
            timings: Timings {
                asr_ms,
                judge_ms,
                total_ms: elapsed_ms(started),
            },
            provider: recognition.provider_used,
        })
    }

    /// Grades the recording directly with an audio-capable judge.
    pub async fn judge_audio(
        &self,
        clip: &AudioClip,
        expected: &str,
        language: &LanguageTag,
    ) -> Result<Verdict, GradingError> {
        if !self.audio_judge.is_configured() {
            return Err(GradingError::MissingCredentials("OPENAI_API_KEY"));
        }
        let prompt = build_audio_prompt(expected, language, clip)
            .ok_or_else(|| GradingError::UnsupportedAudio(clip.mime.clone()))?;

        let raw = self
            .audio_judge
            .complete_json(&prompt)
            .await
            .map_err(GradingError::Judge)?;

        Ok(Verdict::from_judge_text(&raw))
    }

    /// Grades with the structured assessment provider.
    pub async fn assess(
        &self,
        clip: &AudioClip,
        expected: &str,
        language: &LanguageTag,
    ) -> Result<Verdict, GradingError> {
        if !self.assessor.is_configured() {
            return Err(GradingError::MissingCredentials("AZURE_SPEECH_KEY"));
        }

        let document = self.assessor.assess(clip, expected, language).await?;
        let expected_tone = if language.is_mandarin() {
            self.evidence.expected_tone(expected).await
        } else {
            None
        };

        let verdict = assessment_verdict(&document, language, expected_tone);
        tracing::info!(
            pass = verdict.pass,
            score = verdict.score,
            language = %language,
            "Assessment verdict normalized"
        );
        Ok(verdict)
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
    #[error("unsupported audio format for audio judge: {0}")]
    UnsupportedAudio(String),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
    #[error("judge: {0}")]
    Judge(#[from] JudgeError),
    #[error("assessment: {0}")]
    Assessment(#[from] AssessmentError),
}

impl GradingError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingCredentials(_) => "configuration",
            Self::UnsupportedAudio(_) => "request",
            Self::Recognition(_) => "asr",
            Self::Judge(_) => "judge",
            Self::Assessment(_) => "assessment",
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Recognition(e) => e.source.upstream_status(),
            Self::Judge(e) => e.upstream_status(),
            Self::Assessment(e) => e.upstream_status(),
            _ => None,
        }
    }

    /// Adapter-level credential errors surface the same way as the
    /// pre-flight check.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials(_)
                | Self::Recognition(RecognitionError {
                    source: TranscriptionError::MissingCredentials(_),
                    ..
                })
                | Self::Judge(JudgeError::MissingCredentials(_))
                | Self::Assessment(AssessmentError::MissingCredentials(_))
        )
    }
}
