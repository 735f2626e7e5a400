mod grading_service;
mod judge_prompt;
mod phonetic_evidence_service;
mod recognition_service;

pub use grading_service::{GradeOutcome, GradeRequest, GradingError, GradingService, Timings};
pub use judge_prompt::{build_audio_prompt, build_evidence_prompt};
pub use phonetic_evidence_service::PhoneticEvidenceService;
pub use recognition_service::{RecognitionError, RecognitionService};
