mod assessment;
mod audio_clip;
mod candidate_list;
mod language_tag;
mod phonetic_evidence;
mod recognition;
pub mod script;
mod upstream_reply;
mod verdict;

pub use assessment::{
    AssessmentScores, DEFAULT_PASS_THRESHOLD, EN_HINT_ACCURACY, EN_HINT_COMPLETENESS,
    EN_HINT_DEFAULT, EN_HINT_FLUENCY, MANDARIN_PASS_THRESHOLD, ZH_HINT_ACCURACY, ZH_HINT_DEFAULT,
    assessment_verdict, fallback_hint, heard_tone, pass_threshold,
};
pub use audio_clip::{AudioClip, AudioFormat};
pub use candidate_list::CandidateList;
pub use language_tag::{DEFAULT_LANGUAGE, LanguageTag};
pub use phonetic_evidence::{
    EnEvidence, EvidenceMode, MAX_EN_HOMOPHONES, PinyinSyllable, Reading, ZhEvidence, tone_label,
    to_tone_digit_form,
};
pub use recognition::{Recognition, RecognitionMode, RecognitionProvider};
pub use upstream_reply::{UpstreamReply, extract_error_message};
pub use verdict::{MAX_HINT_CHARS, Tone, Verdict, clamp_score, truncate_hint};
